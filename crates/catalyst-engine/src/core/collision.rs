//! Circle-circle contact and the reaction probability formula.

use glam::Vec2;

use crate::api::config::Tuning;
use crate::components::body::Body;

/// Whether two bodies overlap.
pub fn overlapping(a: &Body, b: &Body) -> bool {
    a.pos.distance_squared(b.pos) < (a.radius + b.radius).powi(2)
}

/// Push two overlapping bodies apart along the line between them and send
/// them directly away from each other at half their summed speed.
///
/// Returns the combined speed `|v_a| + |v_b|` measured before the response.
pub fn resolve_contact(a: &mut Body, b: &mut Body) -> f32 {
    let combined = a.speed() + b.speed();
    let delta = b.pos - a.pos;
    let distance = delta.length();

    // atan2(0, 0) == 0: coincident bodies split along +x.
    let normal = Vec2::from_angle(delta.y.atan2(delta.x));
    let split = combined * 0.5;
    a.vel = -normal * split;
    b.vel = normal * split;

    let overlap = a.radius + b.radius - distance;
    if overlap > 0.0 && distance > 0.0 {
        let push = delta / distance * (overlap * 0.5 + 1.0);
        a.pos -= push;
        b.pos += push;
    }

    combined
}

/// Probability bonus from collision speed, in `[0, bonus_max]`.
pub fn speed_bonus(combined_speed: f32, tuning: &Tuning) -> f32 {
    let span = tuning.reaction_speed_max - tuning.reaction_speed_threshold;
    if span <= 0.0 {
        return 0.0;
    }
    let t = ((combined_speed - tuning.reaction_speed_threshold) / span).clamp(0.0, 1.0);
    t * tuning.reaction_speed_bonus_max
}

/// Final chance that a collision reacts.
pub fn reaction_probability(
    base_probability: f32,
    combined_speed: f32,
    global_bonus: f32,
    tuning: &Tuning,
) -> f32 {
    (base_probability + speed_bonus(combined_speed, tuning) + global_bonus).clamp(0.0, 1.0)
}
