//! Purchasable upgrades and the modifiers they drive.
//!
//! Upgrades are listed in catalog order, bought at most once, and paid
//! from the bank. Buying one debits its full cost and applies its effect in
//! a single call; a refused purchase changes nothing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::bank::CounterStore;
use crate::chemistry::normalize_symbol;
use crate::core::rng::RandomSource;
use crate::core::world::ClickResolver;
use crate::error::ChemError;

const UPGRADES_JSON: &str = include_str!("../../data/upgrades.json");

/// What an upgrade does once bought.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeEffect {
    /// Adds `rate` per second of passive production.
    AutoElement { symbol: String, rate: f64 },
    /// Raises the chance a click spawns `symbol`, up to `cap`.
    ClickChanceAdd { symbol: String, delta: f32, cap: f32 },
    /// Raises the chance of every reaction.
    ReactionProbabilityAdd { delta: f32 },
    /// Multiplies how many bodies each successful click roll yields.
    ClickMultiply { factor: f32 },
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UpgradeRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    pub cost: BTreeMap<String, f64>,
    pub effect: UpgradeEffect,
}

impl UpgradeRecord {
    fn normalized(mut self) -> Self {
        self.cost = self
            .cost
            .into_iter()
            .map(|(s, n)| (normalize_symbol(&s), n))
            .collect();
        match &mut self.effect {
            UpgradeEffect::AutoElement { symbol, .. }
            | UpgradeEffect::ClickChanceAdd { symbol, .. } => *symbol = normalize_symbol(symbol),
            UpgradeEffect::ReactionProbabilityAdd { .. } | UpgradeEffect::ClickMultiply { .. } => {}
        }
        self
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    upgrades: Vec<UpgradeRecord>,
}

/// Per-symbol chance that a click spawns that element.
#[derive(Debug, Clone, Default)]
pub struct ClickChances {
    chances: Vec<(String, f32)>,
}

impl ClickChances {
    pub fn new<'a>(initial: impl IntoIterator<Item = (&'a String, &'a f32)>) -> Self {
        let mut table = Self::default();
        for (symbol, &chance) in initial {
            table.set(symbol, chance.clamp(0.0, 1.0));
        }
        table
    }

    fn set(&mut self, symbol: &str, chance: f32) {
        let symbol = normalize_symbol(symbol);
        match self.chances.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, c)) => *c = chance,
            None => self.chances.push((symbol, chance)),
        }
    }

    pub fn get(&self, symbol: &str) -> f32 {
        let symbol = normalize_symbol(symbol);
        self.chances
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, c)| *c)
            .unwrap_or(0.0)
    }

    /// Add `delta`, clamped to `cap`. Returns the new chance.
    pub fn add(&mut self, symbol: &str, delta: f32, cap: f32) -> f32 {
        let next = (self.get(symbol) + delta).min(cap.clamp(0.0, 1.0)).max(0.0);
        self.set(symbol, next);
        next
    }

    /// Roll every symbol independently, in table order.
    pub fn resolve(&self, rng: &mut dyn RandomSource) -> Vec<String> {
        self.chances
            .iter()
            .filter(|(_, chance)| *chance > 0.0)
            .filter(|(_, chance)| rng.next_f32() < *chance)
            .map(|(s, _)| s.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.chances.iter().map(|(s, c)| (s.as_str(), *c))
    }
}

/// Global modifiers accumulated from purchased upgrades.
#[derive(Debug, Clone)]
pub struct Modifiers {
    pub auto_rates: BTreeMap<String, f64>,
    pub click_chances: ClickChances,
    pub reaction_bonus: f32,
    pub click_multiplier: f32,
}

impl Modifiers {
    pub fn new(click_chances: ClickChances) -> Self {
        Self {
            auto_rates: BTreeMap::new(),
            click_chances,
            reaction_bonus: 0.0,
            click_multiplier: 1.0,
        }
    }

    pub fn apply(&mut self, effect: &UpgradeEffect) {
        match effect {
            UpgradeEffect::AutoElement { symbol, rate } => {
                *self.auto_rates.entry(symbol.clone()).or_insert(0.0) += rate.max(0.0);
            }
            UpgradeEffect::ClickChanceAdd { symbol, delta, cap } => {
                self.click_chances.add(symbol, *delta, *cap);
            }
            UpgradeEffect::ReactionProbabilityAdd { delta } => {
                self.reaction_bonus = (self.reaction_bonus + delta).clamp(0.0, 1.0);
            }
            UpgradeEffect::ClickMultiply { factor } => {
                self.click_multiplier *= factor.max(0.0);
            }
        }
    }

    /// Bodies spawned per successful click roll.
    pub fn click_yield(&self) -> usize {
        (self.click_multiplier.floor() as usize).max(1)
    }
}

/// The upgrade shop: what is still for sale, plus the modifiers bought so far.
pub struct UpgradeEngine {
    available: Vec<UpgradeRecord>,
    purchased: Vec<String>,
    modifiers: Modifiers,
}

impl UpgradeEngine {
    /// Load the built-in catalog.
    pub fn load(click_chances: ClickChances) -> Result<Self, ChemError> {
        Self::from_json(UPGRADES_JSON, click_chances)
    }

    pub fn from_json(json: &str, click_chances: ClickChances) -> Result<Self, ChemError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.upgrades, click_chances))
    }

    pub fn new(catalog: Vec<UpgradeRecord>, click_chances: ClickChances) -> Self {
        Self {
            available: catalog.into_iter().map(UpgradeRecord::normalized).collect(),
            purchased: Vec::new(),
            modifiers: Modifiers::new(click_chances),
        }
    }

    /// Upgrades still for sale, in catalog order.
    pub fn list_available(&self) -> &[UpgradeRecord] {
        &self.available
    }

    /// The first `n` upgrades still for sale.
    pub fn window(&self, n: usize) -> &[UpgradeRecord] {
        &self.available[..n.min(self.available.len())]
    }

    pub fn can_afford(&self, record: &UpgradeRecord, bank: &CounterStore) -> bool {
        record.cost.iter().all(|(symbol, &amount)| bank.get(symbol) >= amount)
    }

    /// Buy `id`: debit the cost, apply the effect, remove it from sale.
    pub fn purchase(&mut self, id: &str, bank: &mut CounterStore) -> Result<UpgradeRecord, ChemError> {
        let idx = self
            .available
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| ChemError::UpgradeNotFound(id.to_string()))?;

        if !self.can_afford(&self.available[idx], bank) {
            return Err(ChemError::CannotAfford { id: id.to_string() });
        }

        let record = self.available.remove(idx);
        for (symbol, &amount) in &record.cost {
            bank.spend(symbol, amount);
        }
        self.modifiers.apply(&record.effect);
        self.purchased.push(record.id.clone());
        log::debug!("purchased upgrade {}", record.id);
        Ok(record)
    }

    /// Credit passive production for `elapsed_secs` of wall-clock time.
    pub fn auto_tick(&self, elapsed_secs: f64, bank: &mut CounterStore) {
        if !(elapsed_secs.is_finite() && elapsed_secs > 0.0) {
            return;
        }
        for (symbol, &rate) in &self.modifiers.auto_rates {
            bank.increment(symbol, rate * elapsed_secs);
        }
    }

    /// Symbols a click spawns, already repeated by the click yield.
    pub fn resolve_click(&self, rng: &mut dyn RandomSource) -> Vec<String> {
        let per_roll = self.modifiers.click_yield();
        self.modifiers
            .click_chances
            .resolve(rng)
            .into_iter()
            .flat_map(|s| std::iter::repeat(s).take(per_roll))
            .collect()
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn reaction_bonus(&self) -> f32 {
        self.modifiers.reaction_bonus
    }

    /// Ids bought so far, in purchase order.
    pub fn purchased(&self) -> &[String] {
        &self.purchased
    }
}

impl ClickResolver for UpgradeEngine {
    fn resolve_click(&self, rng: &mut dyn RandomSource) -> Vec<String> {
        UpgradeEngine::resolve_click(self, rng)
    }
}
