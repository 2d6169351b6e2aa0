//! One bounded simulation chamber.
//!
//! A world owns its bodies and sparks outright. Shared state (registry,
//! bank, randomness, event sink) is lent in through `WorldContext` for the
//! duration of a call.
//!
//! Tick order is fixed: integrate, collide, decay, then sparks. Removals in
//! the collision and decay passes are deferred to the end of each pass, and
//! bodies created by a pass are appended after it, so a reaction product
//! never collides in the tick that created it. The decay pass runs over the
//! post-collision set, so a fresh product may still decay in that tick.

use glam::Vec2;
use std::collections::BTreeMap;

use super::collision::{overlapping, reaction_probability, resolve_contact};
use super::rng::RandomSource;
use super::time;
use crate::api::config::Tuning;
use crate::api::types::{BodyId, LabEvent, WorldId};
use crate::chemistry::{DecayRule, Registry};
use crate::components::body::Body;
use crate::components::color::ElementColor;
use crate::components::spark::{BurstScale, SparkParticle};
use crate::economy::CounterStore;
use crate::error::ChemError;
use crate::renderer::traits::RenderSurface;

/// Decides which elements a click creates.
pub trait ClickResolver {
    fn resolve_click(&self, rng: &mut dyn RandomSource) -> Vec<String>;
}

/// Shared state a world needs while it runs.
pub struct WorldContext<'a> {
    pub registry: &'a Registry,
    pub bank: &'a mut CounterStore,
    pub rng: &'a mut dyn RandomSource,
    pub tuning: &'a Tuning,
    /// Global bonus added to every reaction's probability.
    pub reaction_bonus: f32,
    pub events: &'a mut Vec<LabEvent>,
}

pub struct World {
    id: WorldId,
    width: f32,
    height: f32,
    bodies: Vec<Body>,
    sparks: Vec<SparkParticle>,
    next_id: u32,
    max_sparks: usize,
    reaction_sparks: usize,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            id: WorldId(0),
            width: width.max(0.0),
            height: height.max(0.0),
            bodies: Vec::with_capacity(128),
            sparks: Vec::with_capacity(256),
            next_id: 1,
            max_sparks: 256,
            reaction_sparks: 14,
        }
    }

    pub fn with_id(mut self, id: WorldId) -> Self {
        self.id = id;
        self
    }

    /// Live spark cap and sparks per reaction.
    pub fn with_spark_limits(mut self, max_sparks: usize, reaction_sparks: usize) -> Self {
        self.max_sparks = max_sparks;
        self.reaction_sparks = reaction_sparks;
        self
    }

    fn next_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Put a new body of `symbol` at `pos` moving in a random direction at
    /// its kind's base speed. Does not touch the bank.
    pub fn place(
        &mut self,
        registry: &Registry,
        rng: &mut dyn RandomSource,
        symbol: &str,
        pos: Vec2,
    ) -> Result<BodyId, ChemError> {
        let kind = registry.get_element(symbol)?;
        let id = self.next_id();
        let vel = Vec2::from_angle(rng.angle()) * kind.base_speed;
        let mut body = Body::new(id, kind).with_pos(pos).with_vel(vel);
        body.contain(self.width, self.height);
        self.bodies.push(body);
        Ok(id)
    }

    /// Create a body and credit the bank with it. Unknown symbols are
    /// skipped and yield None.
    pub fn spawn(&mut self, ctx: &mut WorldContext, symbol: &str, pos: Vec2) -> Option<BodyId> {
        match self.place(ctx.registry, &mut *ctx.rng, symbol, pos) {
            Ok(id) => {
                if let Some(body) = self.bodies.last() {
                    ctx.bank.increment(&body.symbol, 1.0);
                }
                Some(id)
            }
            Err(err) => {
                log::debug!("spawn skipped: {}", err);
                None
            }
        }
    }

    /// Push every body within the push radius of `point` away from it.
    pub fn apply_impulse(&mut self, point: Vec2, tuning: &Tuning, rng: &mut dyn RandomSource) {
        let radius = tuning.push_radius;
        if radius <= 0.0 {
            return;
        }
        for body in &mut self.bodies {
            let delta = body.pos - point;
            let dist = delta.length();
            if dist > radius {
                continue;
            }
            let dir = if dist < 1e-4 {
                Vec2::from_angle(rng.angle())
            } else {
                delta / dist
            };
            let t = (1.0 - dist / radius).max(0.0);
            body.vel += dir * tuning.push_strength * t.powf(tuning.push_falloff);
        }
    }

    /// Emit up to `count` sparks at `origin`, respecting the spark cap.
    pub fn emit_sparks(
        &mut self,
        rng: &mut dyn RandomSource,
        origin: Vec2,
        color: ElementColor,
        count: usize,
        scale: BurstScale,
    ) {
        let room = self.max_sparks.saturating_sub(self.sparks.len());
        for _ in 0..count.min(room) {
            self.sparks.push(SparkParticle::random(rng, origin, color, scale));
        }
    }

    /// Handle a click: push, sparkle, then spawn whatever `resolver` rolls.
    pub fn click(
        &mut self,
        ctx: &mut WorldContext,
        point: Vec2,
        resolver: &dyn ClickResolver,
        sparks: usize,
    ) -> Vec<BodyId> {
        self.apply_impulse(point, ctx.tuning, &mut *ctx.rng);
        self.emit_sparks(&mut *ctx.rng, point, ElementColor::WHITE, sparks, BurstScale::CLICK);
        resolver
            .resolve_click(&mut *ctx.rng)
            .iter()
            .filter_map(|symbol| self.spawn(ctx, symbol, point))
            .collect()
    }

    /// Advance the chamber by `dt` seconds.
    pub fn step(&mut self, dt: f32, ctx: &mut WorldContext) {
        let frames = time::frames(dt);
        self.cull_malformed();

        for body in &mut self.bodies {
            body.integrate(frames, self.width, self.height);
        }
        self.resolve_collisions(ctx);
        self.resolve_decays(ctx);
        self.sparks.retain_mut(|s| s.tick(frames));
    }

    fn cull_malformed(&mut self) {
        let before = self.bodies.len();
        self.bodies.retain(Body::is_finite);
        let dropped = before - self.bodies.len();
        if dropped > 0 {
            log::warn!("world {}: culled {} malformed bodies", self.id.0, dropped);
        }
        self.sparks.retain(|s| s.pos.is_finite() && s.life.is_finite());
    }

    fn resolve_collisions(&mut self, ctx: &mut WorldContext) {
        let registry = ctx.registry;
        let (width, height) = (self.width, self.height);
        let n = self.bodies.len();
        let mut consumed = vec![false; n];
        let mut products: Vec<(&str, Vec2)> = Vec::new();
        let mut bursts: Vec<(Vec2, ElementColor)> = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                if consumed[i] {
                    break;
                }
                if consumed[j] {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                if !overlapping(a, b) {
                    continue;
                }

                let combined = resolve_contact(a, b);
                a.contain(width, height);
                b.contain(width, height);

                let Some(rule) = registry.get_reaction(&a.symbol, &b.symbol) else {
                    continue;
                };
                let chance = reaction_probability(
                    rule.base_probability,
                    combined,
                    ctx.reaction_bonus,
                    ctx.tuning,
                );
                if ctx.rng.next_f32() >= chance {
                    continue;
                }

                let mid = (a.pos + b.pos) * 0.5;
                if rule.consumes {
                    consumed[i] = true;
                    consumed[j] = true;
                    ctx.bank.spend(&a.symbol, 1.0);
                    ctx.bank.spend(&b.symbol, 1.0);
                }
                products.extend(rule.products.iter().map(|p| (p.as_str(), mid)));
                bursts.push((mid, registry.mix_colors(&a.symbol, &b.symbol)));

                log::debug!("reaction {} at ({:.0}, {:.0})", rule.note, mid.x, mid.y);
                ctx.events.push(LabEvent::Reaction {
                    world: self.id.0,
                    note: rule.note.clone(),
                    x: mid.x,
                    y: mid.y,
                });
            }
        }

        compact(&mut self.bodies, &consumed);
        for (symbol, pos) in products {
            self.spawn(ctx, symbol, pos);
        }
        for (pos, color) in bursts {
            self.emit_sparks(&mut *ctx.rng, pos, color, self.reaction_sparks, BurstScale::REACTION);
        }
    }

    fn resolve_decays(&mut self, ctx: &mut WorldContext) {
        let registry = ctx.registry;
        let mut decayed = vec![false; self.bodies.len()];
        let mut products: Vec<(&str, Vec2)> = Vec::new();

        for (i, body) in self.bodies.iter().enumerate() {
            let rules = registry.decays(&body.symbol);
            if rules.is_empty() {
                continue;
            }
            let Some(rule) = pick_decay(rules, ctx.rng.next_f32()) else {
                continue;
            };

            decayed[i] = true;
            ctx.bank.spend(&body.symbol, 1.0);
            products.extend(rule.products.iter().map(|p| (p.as_str(), body.pos)));

            log::debug!("decay {} at ({:.0}, {:.0})", rule.note, body.pos.x, body.pos.y);
            ctx.events.push(LabEvent::Decay {
                world: self.id.0,
                note: rule.note.clone(),
                x: body.pos.x,
                y: body.pos.y,
            });
        }

        compact(&mut self.bodies, &decayed);
        for (symbol, pos) in products {
            self.spawn(ctx, symbol, pos);
        }
    }

    /// Remove every body, returning how many of each symbol left.
    pub fn collect_all(&mut self) -> BTreeMap<String, u32> {
        let mut collected = BTreeMap::new();
        for body in self.bodies.drain(..) {
            *collected.entry(body.symbol).or_insert(0) += 1;
        }
        collected
    }

    /// Live bodies of `symbol`.
    pub fn count(&self, symbol: &str) -> usize {
        self.bodies.iter().filter(|b| b.symbol == symbol).count()
    }

    /// Draw bodies, then sparks on top.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        for body in &self.bodies {
            surface.draw_body(body);
        }
        for spark in &self.sparks {
            surface.draw_spark(spark);
        }
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn sparks(&self) -> &[SparkParticle] {
        &self.sparks
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Geometric centre of the chamber.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// One roll against a body's decay outcomes, stacked in registration order.
fn pick_decay(rules: &[DecayRule], roll: f32) -> Option<&DecayRule> {
    let mut threshold = 0.0;
    for rule in rules {
        threshold += rule.probability;
        if roll < threshold {
            return Some(rule);
        }
    }
    None
}

fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j);
    let (left, right) = items.split_at_mut(j);
    (&mut left[i], &mut right[0])
}

/// Drop every item whose flag is set, keeping order.
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !removed.get(idx).copied().unwrap_or(false);
        idx += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{Rng, ScriptedRng};

    struct Fixture {
        registry: Registry,
        bank: CounterStore,
        tuning: Tuning,
        events: Vec<LabEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: Registry::load().unwrap(),
                bank: CounterStore::new(),
                tuning: Tuning::default(),
                events: Vec::new(),
            }
        }

        fn ctx<'a>(&'a mut self, rng: &'a mut dyn RandomSource) -> WorldContext<'a> {
            WorldContext {
                registry: &self.registry,
                bank: &mut self.bank,
                rng,
                tuning: &self.tuning,
                reaction_bonus: 0.0,
                events: &mut self.events,
            }
        }
    }

    struct Always(Vec<&'static str>);

    impl ClickResolver for Always {
        fn resolve_click(&self, _rng: &mut dyn RandomSource) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn spawn_credits_bank_and_sets_speed() {
        let mut fx = Fixture::new();
        let mut rng = ScriptedRng::constant(0.0);
        let mut world = World::new(600.0, 600.0);
        let id = world.spawn(&mut fx.ctx(&mut rng), "he", Vec2::new(100.0, 100.0)).unwrap();

        let body = world.get(id).unwrap();
        assert_eq!(body.symbol, "He");
        assert!((body.vel - Vec2::new(0.9, 0.0)).length() < 1e-6);
        assert_eq!(fx.bank.get("He"), 1.0);
    }

    #[test]
    fn spawn_unknown_returns_none() {
        let mut fx = Fixture::new();
        let mut rng = Rng::new(1);
        let mut world = World::new(600.0, 600.0);
        assert!(world.spawn(&mut fx.ctx(&mut rng), "Zz", Vec2::ZERO).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn hydrogen_pair_fuses_at_midpoint() {
        let mut fx = Fixture::new();
        let mut rng = ScriptedRng::constant(0.0);
        let mut world = World::new(600.0, 600.0);
        {
            let mut ctx = fx.ctx(&mut rng);
            world.spawn(&mut ctx, "H", Vec2::new(100.0, 100.0));
            world.spawn(&mut ctx, "H", Vec2::new(105.0, 100.0));
        }
        for b in world.bodies_mut() {
            b.vel = Vec2::ZERO;
        }

        world.step(1.0 / 60.0, &mut fx.ctx(&mut rng));

        assert_eq!(world.len(), 1);
        let he = &world.bodies()[0];
        assert_eq!(he.symbol, "He");
        assert!((he.pos - Vec2::new(102.5, 100.0)).length() < 1e-3);
        assert_eq!(world.count("H"), 0);
        assert!(matches!(fx.events[0], LabEvent::Reaction { .. }));
        assert_eq!(world.sparks().len(), 14);
    }

    #[test]
    fn reaction_sparks_take_mixed_reactant_color() {
        let mut fx = Fixture::new();
        let mut rng = ScriptedRng::constant(0.0);
        let mut world = World::new(600.0, 600.0);
        {
            let mut ctx = fx.ctx(&mut rng);
            world.spawn(&mut ctx, "H", Vec2::new(300.0, 300.0));
            world.spawn(&mut ctx, "H", Vec2::new(304.0, 300.0));
        }
        world.step(1.0 / 60.0, &mut fx.ctx(&mut rng));
        let expected = fx.registry.mix_colors("H", "H");
        assert!(!world.sparks().is_empty());
        assert!(world.sparks().iter().all(|s| s.color == expected));
    }

    #[test]
    fn fresh_product_can_decay_in_same_tick() {
        let mut fx = Fixture::new();
        let mut rng = ScriptedRng::constant(0.0);
        let mut world = World::new(600.0, 600.0);
        {
            let mut ctx = fx.ctx(&mut rng);
            world.spawn(&mut ctx, "He", Vec2::new(300.0, 300.0));
            world.spawn(&mut ctx, "He", Vec2::new(305.0, 300.0));
        }
        world.step(1.0 / 60.0, &mut fx.ctx(&mut rng));

        let kinds: Vec<&str> = fx
            .events
            .iter()
            .map(|e| match e {
                LabEvent::Reaction { .. } => "reaction",
                LabEvent::Decay { .. } => "decay",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["reaction", "decay"]);
        assert_eq!(world.count("Be"), 0);
        assert_eq!(world.count("He"), 2);
    }

    #[test]
    fn body_ids_wrap_instead_of_overflowing() {
        let registry = Registry::load().unwrap();
        let mut rng = ScriptedRng::constant(0.5);
        let mut world = World::new(600.0, 600.0);
        world.next_id = u32::MAX;
        let last = world.place(&registry, &mut rng, "H", Vec2::new(100.0, 100.0)).unwrap();
        let wrapped = world.place(&registry, &mut rng, "H", Vec2::new(200.0, 100.0)).unwrap();
        assert_eq!(last, BodyId(u32::MAX));
        assert_eq!(wrapped, BodyId(0));
    }

    #[test]
    fn failed_roll_keeps_reactants() {
        let mut fx = Fixture::new();
        let mut rng = ScriptedRng::constant(0.99);
        let mut world = World::new(600.0, 600.0);
        {
            let mut ctx = fx.ctx(&mut rng);
            world.spawn(&mut ctx, "H", Vec2::new(100.0, 100.0));
            world.spawn(&mut ctx, "H", Vec2::new(105.0, 100.0));
        }
        world.step(1.0 / 60.0, &mut fx.ctx(&mut rng));
        assert_eq!(world.count("H"), 2);
        let (a, b) = (&world.bodies()[0], &world.bodies()[1]);
        assert!(a.pos.distance(b.pos) > 5.0, "bodies should be pushed apart");
    }

    #[test]
    fn reaction_debits_reactants_and_credits_product() {
        let mut fx = Fixture::new();
        let mut rng = ScriptedRng::constant(0.0);
        let mut world = World::new(600.0, 600.0);
        {
            let mut ctx = fx.ctx(&mut rng);
            world.spawn(&mut ctx, "H", Vec2::new(300.0, 300.0));
            world.spawn(&mut ctx, "H", Vec2::new(300.0, 300.0));
        }
        assert_eq!(fx.bank.get("H"), 2.0);
        world.step(1.0 / 60.0, &mut fx.ctx(&mut rng));
        assert_eq!(fx.bank.get("H"), 0.0);
        assert_eq!(fx.bank.get("He"), 1.0);
    }

    #[test]
    fn consumed_body_skips_later_pairs() {
        let mut fx = Fixture::new();
        let mut rng = ScriptedRng::constant(0.0);
        let mut world = World::new(600.0, 600.0);
        {
            let mut ctx = fx.ctx(&mut rng);
            for _ in 0..3 {
                world.spawn(&mut ctx, "H", Vec2::new(300.0, 300.0));
            }
        }
        for b in world.bodies_mut() {
            b.vel = Vec2::ZERO;
        }
        world.step(1.0 / 60.0, &mut fx.ctx(&mut rng));
        // one pair fuses, the third hydrogen survives
        assert_eq!(world.count("He"), 1);
        assert_eq!(world.count("H"), 1);
    }

    #[test]
    fn decay_replaces_body_with_products() {
        let mut fx = Fixture::new();
        let mut rng = ScriptedRng::constant(0.0);
        let mut world = World::new(600.0, 600.0);
        world.spawn(&mut fx.ctx(&mut rng), "Be", Vec2::new(300.0, 300.0));
        world.bodies_mut()[0].vel = Vec2::ZERO;

        world.step(1.0 / 60.0, &mut fx.ctx(&mut rng));

        assert_eq!(world.count("Be"), 0);
        assert_eq!(world.count("He"), 2);
        assert_eq!(fx.bank.get("Be"), 0.0);
        assert_eq!(fx.bank.get("He"), 2.0);
        assert!(fx.events.iter().any(|e| matches!(e, LabEvent::Decay { .. })));
    }

    #[test]
    fn decay_picks_outcome_by_stacked_probability() {
        let registry = Registry::load().unwrap();
        let tc = registry.decays("Tc");
        assert_eq!(pick_decay(tc, 0.0015).unwrap().products[0], "Mo");
        assert_eq!(pick_decay(tc, 0.0025).unwrap().products[0], "Ru");
        assert!(pick_decay(tc, 0.5).is_none());
    }

    #[test]
    fn bodies_stay_inside_walls() {
        let mut fx = Fixture::new();
        let mut rng = Rng::new(1234);
        let mut world = World::new(500.0, 200.0);
        {
            let mut ctx = fx.ctx(&mut rng);
            for i in 0..60 {
                let symbol = if i % 3 == 0 { "He" } else { "H" };
                world.spawn(&mut ctx, symbol, Vec2::new(i as f32 * 9.0, 500.0));
            }
        }
        for _ in 0..600 {
            world.step(1.0 / 60.0, &mut fx.ctx(&mut rng));
            for b in world.bodies() {
                assert!(b.pos.x - b.radius >= -1e-3 && b.pos.x + b.radius <= 500.0 + 1e-3);
                assert!(b.pos.y - b.radius >= -1e-3 && b.pos.y + b.radius <= 200.0 + 1e-3);
            }
        }
        assert!(fx.bank.iter().all(|(_, n)| n >= 0.0));
    }

    #[test]
    fn impulse_pushes_away_with_falloff() {
        let mut fx = Fixture::new();
        let mut rng = ScriptedRng::constant(0.0);
        let mut world = World::new(600.0, 600.0);
        {
            let mut ctx = fx.ctx(&mut rng);
            world.spawn(&mut ctx, "H", Vec2::new(160.0, 100.0));
            world.spawn(&mut ctx, "H", Vec2::new(400.0, 100.0));
        }
        for b in world.bodies_mut() {
            b.vel = Vec2::ZERO;
        }
        world.apply_impulse(Vec2::new(100.0, 100.0), &fx.tuning, &mut rng);

        let near = &world.bodies()[0];
        let expected = 6.0 * 0.5f32.powf(1.6);
        assert!((near.vel.x - expected).abs() < 1e-4);
        assert_eq!(near.vel.y, 0.0);
        assert_eq!(world.bodies()[1].vel, Vec2::ZERO);
    }

    #[test]
    fn click_spawns_resolved_symbols_and_sparks() {
        let mut fx = Fixture::new();
        let mut rng = Rng::new(9);
        let mut world = World::new(600.0, 600.0);
        let ids = world.click(
            &mut fx.ctx(&mut rng),
            Vec2::new(50.0, 60.0),
            &Always(vec!["H", "Na", "bogus"]),
            8,
        );
        assert_eq!(ids.len(), 2);
        assert_eq!(world.sparks().len(), 8);
        assert_eq!(fx.bank.get("Na"), 1.0);
    }

    #[test]
    fn sparks_expire() {
        let mut fx = Fixture::new();
        let mut rng = Rng::new(3);
        let mut world = World::new(600.0, 600.0);
        world.emit_sparks(&mut rng, Vec2::new(10.0, 10.0), ElementColor::WHITE, 8, BurstScale::CLICK);
        assert_eq!(world.sparks().len(), 8);
        for _ in 0..60 {
            world.step(1.0 / 60.0, &mut fx.ctx(&mut rng));
        }
        assert!(world.sparks().is_empty());
    }

    #[test]
    fn spark_cap_truncates_bursts() {
        let mut rng = Rng::new(3);
        let mut world = World::new(600.0, 600.0).with_spark_limits(10, 14);
        world.emit_sparks(&mut rng, Vec2::ZERO, ElementColor::WHITE, 8, BurstScale::CLICK);
        world.emit_sparks(&mut rng, Vec2::ZERO, ElementColor::WHITE, 8, BurstScale::CLICK);
        assert_eq!(world.sparks().len(), 10);
    }

    #[test]
    fn malformed_bodies_are_culled() {
        let mut fx = Fixture::new();
        let mut rng = ScriptedRng::constant(0.5);
        let mut world = World::new(600.0, 600.0);
        {
            let mut ctx = fx.ctx(&mut rng);
            world.spawn(&mut ctx, "H", Vec2::new(100.0, 100.0));
            world.spawn(&mut ctx, "H", Vec2::new(400.0, 400.0));
        }
        world.bodies_mut()[0].vel = Vec2::new(f32::NAN, 0.0);
        world.step(1.0 / 60.0, &mut fx.ctx(&mut rng));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn collect_all_empties_world() {
        let mut fx = Fixture::new();
        let mut rng = Rng::new(11);
        let mut world = World::new(600.0, 600.0);
        {
            let mut ctx = fx.ctx(&mut rng);
            world.spawn(&mut ctx, "H", Vec2::new(100.0, 100.0));
            world.spawn(&mut ctx, "H", Vec2::new(300.0, 100.0));
            world.spawn(&mut ctx, "O", Vec2::new(500.0, 100.0));
        }
        let got = world.collect_all();
        assert_eq!(got.get("H"), Some(&2));
        assert_eq!(got.get("O"), Some(&1));
        assert!(world.is_empty());
        assert_eq!(fx.bank.get("H"), 2.0);
    }
}
