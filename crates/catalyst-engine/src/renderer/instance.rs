use bytemuck::{Pod, Zeroable};

use super::traits::RenderSurface;
use crate::components::body::Body;
use crate::components::spark::SparkParticle;

/// One filled circle as the host reads it from linear memory.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity; sparks fade with their remaining life.
    pub alpha: f32,
    /// Element table index to label the circle with, or `NO_LABEL`.
    pub label: f32,
}

impl CircleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const NO_LABEL: f32 = -1.0;
}

/// Per-world circle list, rebuilt every frame.
pub struct CircleBuffer {
    instances: Vec<CircleInstance>,
    capacity: usize,
}

impl CircleBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Circles past `max` are dropped.
    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            capacity: max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: CircleInstance) {
        if self.instances.len() < self.capacity {
            self.instances.push(instance);
        }
    }

    pub fn instances(&self) -> &[CircleInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for CircleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for CircleBuffer {
    fn draw_body(&mut self, body: &Body) {
        self.push(CircleInstance {
            x: body.pos.x,
            y: body.pos.y,
            radius: body.radius,
            r: body.color.r,
            g: body.color.g,
            b: body.color.b,
            alpha: 1.0,
            label: body.kind as f32,
        });
    }

    fn draw_spark(&mut self, spark: &SparkParticle) {
        self.push(CircleInstance {
            x: spark.pos.x,
            y: spark.pos.y,
            radius: spark.radius,
            r: spark.color.r,
            g: spark.color.g,
            b: spark.color.b,
            alpha: spark.life.clamp(0.0, 1.0),
            label: CircleInstance::NO_LABEL,
        });
    }
}
