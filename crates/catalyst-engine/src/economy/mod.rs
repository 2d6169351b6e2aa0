pub mod bank;
pub mod discovery;
pub mod techtree;
pub mod upgrades;

pub use bank::CounterStore;
pub use discovery::DiscoveryGate;
pub use techtree::{MoleculeRecipe, Requirement, Techtree};
pub use upgrades::{ClickChances, Modifiers, UpgradeEffect, UpgradeEngine, UpgradeRecord};
