/// Simulation ticks are tuned against this rate: velocities are in world
/// units per frame at 60 Hz.
pub const REFERENCE_FPS: f32 = 60.0;

/// Convert seconds to reference frames.
pub fn frames(dt: f32) -> f32 {
    dt * REFERENCE_FPS
}

/// Fixed timestep accumulator.
/// Runs simulation ticks at a steady rate regardless of the host's frame time.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Most ticks run for one host frame; excess time is dropped.
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt: dt.max(1e-4),
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns the number of fixed ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Forget pending time, so a pause does not replay as a burst of ticks.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}
