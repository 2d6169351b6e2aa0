pub mod api;
pub mod chemistry;
pub mod components;
pub mod core;
pub mod economy;
pub mod error;
pub mod input;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{LabConfig, Tuning, WorldSpec};
pub use api::lab::Lab;
pub use api::snapshot::LabSnapshot;
pub use api::types::{wire_kinds, BodyId, LabEvent, WireEvent, WorldId};
pub use chemistry::{ElementKind, Registry};
pub use components::body::Body;
pub use components::color::ElementColor;
pub use components::spark::SparkParticle;
pub use core::rng::{RandomSource, Rng, ScriptedRng};
pub use core::time::FixedTimestep;
pub use core::world::{ClickResolver, World, WorldContext};
pub use economy::{CounterStore, DiscoveryGate, Techtree, UpgradeEngine};
pub use error::ChemError;
pub use input::queue::{custom_kinds, InputEvent, InputQueue};
pub use renderer::{CircleBuffer, CircleInstance, RenderSurface};
