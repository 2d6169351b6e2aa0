use glam::Vec2;

use super::color::ElementColor;
use crate::api::types::BodyId;
use crate::chemistry::ElementKind;

/// A simulated element: a circle with a symbol.
///
/// Owned by exactly one `World`. Bodies never change symbol; a reaction
/// product is a new body.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub symbol: String,
    /// Element table index of `symbol`.
    pub kind: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: ElementColor,
}

impl Body {
    /// A body of the given kind at rest at the origin.
    pub fn new(id: BodyId, kind: &ElementKind) -> Self {
        Self {
            id,
            symbol: kind.symbol.clone(),
            kind: kind.index,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: kind.radius,
            color: kind.color,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// False if any coordinate went NaN/inf; such bodies are culled.
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite() && self.radius.is_finite()
    }

    /// Move by `vel * frames`, then bounce off the walls.
    pub fn integrate(&mut self, frames: f32, width: f32, height: f32) {
        self.pos += self.vel * frames;
        self.bounce(width, height);
    }

    /// Reflect the velocity component pointing into a penetrated wall and
    /// clamp back inside. Axes are independent.
    pub fn bounce(&mut self, width: f32, height: f32) {
        if self.pos.x - self.radius < 0.0 {
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x + self.radius > width {
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y - self.radius < 0.0 {
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y + self.radius > height {
            self.vel.y = -self.vel.y.abs();
        }
        self.contain(width, height);
    }

    /// Clamp the position so the circle lies inside `[0, width] x [0, height]`.
    /// A body wider than the world sits on that axis's centre line.
    pub fn contain(&mut self, width: f32, height: f32) {
        self.pos.x = clamp_axis(self.pos.x, self.radius, width);
        self.pos.y = clamp_axis(self.pos.y, self.radius, height);
    }
}

fn clamp_axis(v: f32, radius: f32, extent: f32) -> f32 {
    if extent <= radius * 2.0 {
        extent * 0.5
    } else {
        v.clamp(radius, extent - radius)
    }
}
