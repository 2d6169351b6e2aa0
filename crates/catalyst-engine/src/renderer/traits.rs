//! Drawing contract between a world and whatever paints it.
//!
//! The engine never draws. A world walks its live entities once per frame
//! and hands each one to a `RenderSurface`: the bundled `CircleBuffer`
//! packs them for the host, and a native backend can implement the trait
//! directly.

use crate::components::body::Body;
use crate::components::spark::SparkParticle;

pub trait RenderSurface {
    /// A filled circle of the body's radius and color, labelled with its
    /// symbol.
    fn draw_body(&mut self, body: &Body);

    /// An unlabelled circle faded by the spark's remaining life.
    fn draw_spark(&mut self, spark: &SparkParticle);
}
