pub mod instance;
pub mod traits;

pub use instance::{CircleBuffer, CircleInstance};
pub use traits::RenderSurface;
