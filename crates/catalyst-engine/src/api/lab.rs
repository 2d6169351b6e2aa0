//! The lab: one explicit application context holding every piece of shared
//! state (registry, bank, upgrades, techtree, discovery gate) next to the
//! worlds it lends that state to.

use glam::Vec2;
use std::collections::BTreeMap;

use super::config::LabConfig;
use super::snapshot::{CounterView, LabSnapshot, MoleculeView, UpgradeView};
use super::types::{BodyId, LabEvent, WorldId};
use crate::chemistry::{normalize_symbol, Registry};
use crate::core::rng::{RandomSource, Rng};
use crate::core::world::{World, WorldContext};
use crate::economy::{ClickChances, CounterStore, DiscoveryGate, Techtree, UpgradeEngine};
use crate::error::ChemError;

const DEFAULT_SEED: u64 = 0x5eed_c0ff_ee00_0001;

pub struct Lab {
    config: LabConfig,
    registry: Registry,
    bank: CounterStore,
    upgrades: UpgradeEngine,
    techtree: Techtree,
    discovery: DiscoveryGate,
    worlds: Vec<World>,
    rng: Box<dyn RandomSource>,
    events: Vec<LabEvent>,
    spawn_amount_idx: usize,
}

impl Lab {
    /// A lab over the built-in tables, seeded from `config.rng_seed`.
    pub fn new(config: LabConfig) -> Result<Self, ChemError> {
        let seed = config.rng_seed.unwrap_or(DEFAULT_SEED);
        Self::with_rng(config, Box::new(Rng::new(seed)))
    }

    /// A lab over the built-in tables with a caller-chosen random source.
    pub fn with_rng(config: LabConfig, rng: Box<dyn RandomSource>) -> Result<Self, ChemError> {
        let registry = Registry::load()?;
        let upgrades = UpgradeEngine::load(ClickChances::new(&config.initial_click_chances))?;
        let techtree = Techtree::load(config.recipe_scale)?;
        Ok(Self::from_parts(config, registry, upgrades, techtree, rng))
    }

    /// Assemble a lab from already-built parts. Creates `config.worlds`.
    pub fn from_parts(
        config: LabConfig,
        registry: Registry,
        upgrades: UpgradeEngine,
        techtree: Techtree,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let mut lab = Self {
            registry,
            bank: CounterStore::new(),
            upgrades,
            techtree,
            discovery: DiscoveryGate::new(),
            worlds: Vec::new(),
            rng,
            events: Vec::new(),
            spawn_amount_idx: 0,
            config,
        };
        for spec in lab.config.worlds.clone() {
            lab.add_world(spec.width, spec.height);
        }
        log::info!(
            "lab ready: {} elements, {} upgrades, {} molecules, {} worlds",
            lab.registry.len(),
            lab.upgrades.list_available().len(),
            lab.techtree.recipes().len(),
            lab.worlds.len()
        );
        lab
    }

    pub fn add_world(&mut self, width: f32, height: f32) -> WorldId {
        let id = WorldId(self.worlds.len());
        let world = World::new(width, height)
            .with_id(id)
            .with_spark_limits(self.config.max_sparks, self.config.reaction_sparks);
        self.worlds.push(world);
        id
    }

    /// Run `f` against one world with the shared state lent in.
    fn with_world<R>(
        &mut self,
        id: WorldId,
        f: impl FnOnce(&mut World, &mut WorldContext, &UpgradeEngine) -> R,
    ) -> Result<R, ChemError> {
        let world = self
            .worlds
            .get_mut(id.0)
            .ok_or(ChemError::UnknownWorld(id.0))?;
        let mut ctx = WorldContext {
            registry: &self.registry,
            bank: &mut self.bank,
            rng: self.rng.as_mut(),
            tuning: &self.config.tuning,
            reaction_bonus: self.upgrades.reaction_bonus(),
            events: &mut self.events,
        };
        Ok(f(world, &mut ctx, &self.upgrades))
    }

    /// True while a modal is open; both ticks are skipped.
    pub fn is_paused(&self) -> bool {
        self.discovery.is_modal_open()
    }

    /// The UI reports whether a modal is showing. Closing one releases the
    /// next queued discovery.
    pub fn set_modal_open(&mut self, open: bool) {
        self.discovery.set_modal_open(open);
        if !open {
            self.pump();
        }
    }

    /// Advance every world by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if self.is_paused() {
            return;
        }
        let reaction_bonus = self.upgrades.reaction_bonus();
        for world in &mut self.worlds {
            let mut ctx = WorldContext {
                registry: &self.registry,
                bank: &mut self.bank,
                rng: self.rng.as_mut(),
                tuning: &self.config.tuning,
                reaction_bonus,
                events: &mut self.events,
            };
            world.step(dt, &mut ctx);
        }
        self.pump();
    }

    /// Credit passive production for `elapsed_secs` of wall-clock time.
    pub fn auto_tick(&mut self, elapsed_secs: f64) {
        if self.is_paused() {
            return;
        }
        self.upgrades.auto_tick(elapsed_secs, &mut self.bank);
        self.pump();
    }

    /// A click at chamber-local `(x, y)`: push nearby bodies, sparkle, and
    /// spawn whatever the click-chance table rolls.
    pub fn click(&mut self, world: WorldId, x: f32, y: f32) -> Result<Vec<BodyId>, ChemError> {
        if self.is_paused() {
            return Ok(Vec::new());
        }
        let sparks = self.config.click_sparks;
        let ids = self.with_world(world, |w, ctx, upgrades| {
            w.click(ctx, Vec2::new(x, y), upgrades, sparks)
        })?;
        self.pump();
        Ok(ids)
    }

    /// Buy an upgrade. Refusals leave everything unchanged and emit
    /// `PurchaseRejected`.
    pub fn purchase(&mut self, id: &str) -> Result<(), ChemError> {
        match self.upgrades.purchase(id, &mut self.bank) {
            Ok(record) => {
                self.events.push(LabEvent::Purchased { id: record.id });
                self.pump();
                Ok(())
            }
            Err(err) => {
                log::debug!("purchase rejected: {}", err);
                self.events.push(LabEvent::PurchaseRejected { id: id.to_string() });
                Err(err)
            }
        }
    }

    /// Banked amount of `symbol` not currently alive in any world.
    pub fn stored(&self, symbol: &str) -> u64 {
        let live = self.live_count(symbol) as f64;
        (self.bank.get(symbol) - live).max(0.0).floor() as u64
    }

    /// Bodies of `symbol` alive across all worlds.
    pub fn live_count(&self, symbol: &str) -> usize {
        let symbol = normalize_symbol(symbol);
        self.worlds.iter().map(|w| w.count(&symbol)).sum()
    }

    /// Move `count` stored elements into a world near its centre. Does
    /// nothing while paused.
    pub fn spawn_from_storage(
        &mut self,
        world: WorldId,
        symbol: &str,
        count: u32,
    ) -> Result<u32, ChemError> {
        if self.is_paused() || count == 0 {
            return Ok(0);
        }
        let symbol = self.registry.get_element(symbol)?.symbol.clone();
        let have = self.stored(&symbol);
        if have < count as u64 {
            return Err(ChemError::InsufficientStorage {
                symbol,
                have,
                need: count as u64,
            });
        }

        let jitter = self.config.storage_jitter;
        self.with_world(world, |w, ctx, _| -> Result<u32, ChemError> {
            let center = w.center();
            for _ in 0..count {
                let offset = Vec2::new(
                    ctx.rng.range(-jitter, jitter),
                    ctx.rng.range(-jitter, jitter),
                );
                w.place(ctx.registry, &mut *ctx.rng, &symbol, center + offset)?;
            }
            Ok(count)
        })?
    }

    /// `spawn_from_storage` with the current spawn amount.
    pub fn spawn_batch(&mut self, world: WorldId, symbol: &str) -> Result<u32, ChemError> {
        let amount = self.spawn_amount();
        self.spawn_from_storage(world, symbol, amount)
    }

    /// Move every body in a world back to storage.
    pub fn collect_all(&mut self, world: WorldId) -> Result<BTreeMap<String, u32>, ChemError> {
        let w = self
            .worlds
            .get_mut(world.0)
            .ok_or(ChemError::UnknownWorld(world.0))?;
        Ok(w.collect_all())
    }

    pub fn spawn_amount(&self) -> u32 {
        self.config
            .spawn_amounts
            .get(self.spawn_amount_idx)
            .copied()
            .unwrap_or(1)
    }

    /// Advance to the next spawn amount, wrapping around.
    pub fn cycle_spawn_amount(&mut self) -> u32 {
        let n = self.config.spawn_amounts.len().max(1);
        self.spawn_amount_idx = (self.spawn_amount_idx + 1) % n;
        self.spawn_amount()
    }

    /// Forward discoveries and unlocks produced since the last call.
    fn pump(&mut self) {
        for symbol in self.bank.take_discoveries() {
            self.discovery.enqueue(symbol);
        }
        while let Some(symbol) = self.discovery.next_ready() {
            log::info!("discovered {}", symbol);
            if self.config.discovery_pauses {
                self.discovery.set_modal_open(true);
            }
            self.events.push(LabEvent::Discovered { symbol });
        }
        for (key, order) in self.techtree.evaluate(&self.bank) {
            self.events.push(LabEvent::Unlocked { key, order });
        }
    }

    /// Take every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<LabEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> LabSnapshot {
        let counters = self
            .registry
            .elements()
            .filter(|kind| self.bank.is_discovered(&kind.symbol))
            .map(|kind| CounterView {
                symbol: kind.symbol.clone(),
                name: kind.name.clone(),
                amount: self.bank.get(&kind.symbol),
                live: self.live_count(&kind.symbol),
            })
            .collect();

        let upgrades = self
            .upgrades
            .window(self.config.upgrade_window)
            .iter()
            .map(|u| UpgradeView {
                id: u.id.clone(),
                name: u.name.clone(),
                description: u.description.clone(),
                cost: u.cost.clone(),
                affordable: self.upgrades.can_afford(u, &self.bank),
            })
            .collect();

        let molecules = self
            .techtree
            .display_order()
            .into_iter()
            .map(|m| MoleculeView {
                key: m.key.clone(),
                name: m.name.clone(),
                formula: m.formula.clone(),
                description: m.description.clone(),
                unlocked: m.unlocked,
                requirements: self.techtree.progress(&m.key, &self.bank).unwrap_or_default(),
            })
            .collect();

        let modifiers = self.upgrades.modifiers();
        LabSnapshot {
            paused: self.is_paused(),
            spawn_amount: self.spawn_amount(),
            reaction_bonus: modifiers.reaction_bonus,
            counters,
            click_chances: modifiers
                .click_chances
                .iter()
                .map(|(s, c)| (s.to_string(), c))
                .collect(),
            auto_rates: modifiers.auto_rates.clone(),
            upgrades,
            molecules,
        }
    }

    pub fn world(&self, id: WorldId) -> Option<&World> {
        self.worlds.get(id.0)
    }

    pub fn world_mut(&mut self, id: WorldId) -> Option<&mut World> {
        self.worlds.get_mut(id.0)
    }

    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn bank(&self) -> &CounterStore {
        &self.bank
    }

    pub fn upgrades(&self) -> &UpgradeEngine {
        &self.upgrades
    }

    pub fn techtree(&self) -> &Techtree {
        &self.techtree
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }
}
