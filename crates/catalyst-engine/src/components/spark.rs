//! Cosmetic sparks: short-lived circles emitted by clicks and reactions.

use glam::Vec2;

use super::color::ElementColor;
use crate::core::rng::RandomSource;

/// A single spark. Never reacts, never collides.
#[derive(Debug, Clone)]
pub struct SparkParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at birth, removed at 0.
    pub life: f32,
    /// Life lost per reference frame.
    pub decay: f32,
    pub radius: f32,
    pub color: ElementColor,
}

/// Multipliers applied to a burst's random speed and radius.
#[derive(Debug, Clone, Copy)]
pub struct BurstScale {
    pub speed: f32,
    pub radius: f32,
}

impl BurstScale {
    pub const CLICK: Self = Self { speed: 1.0, radius: 1.0 };
    pub const REACTION: Self = Self { speed: 1.8, radius: 1.6 };
}

impl SparkParticle {
    /// Velocity kept per reference frame.
    pub const DRAG: f32 = 0.98;

    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: ElementColor, decay: f32) -> Self {
        Self { pos, vel, life: 1.0, decay, radius, color }
    }

    /// A randomly directed spark leaving `origin`.
    pub fn random(
        rng: &mut dyn RandomSource,
        origin: Vec2,
        color: ElementColor,
        scale: BurstScale,
    ) -> Self {
        let dir = Vec2::from_angle(rng.angle());
        let speed = rng.range(1.0, 3.0) * scale.speed;
        let radius = rng.range(1.5, 3.5) * scale.radius;
        let decay = rng.range(0.02, 0.04);
        Self::new(origin, dir * speed, radius, color, decay)
    }

    /// Advance by `frames` reference frames. Returns false when expired.
    pub fn tick(&mut self, frames: f32) -> bool {
        self.pos += self.vel * frames;
        self.vel *= Self::DRAG.powf(frames);
        self.life -= self.decay * frames;
        self.life > 0.0
    }
}
