//! Read-only view of the lab for the DOM layer, serialized to JSON once per
//! UI refresh.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::economy::Requirement;

#[derive(Debug, Clone, Serialize)]
pub struct CounterView {
    pub symbol: String,
    pub name: String,
    /// Banked amount (stored plus live).
    pub amount: f64,
    /// Bodies currently in any world.
    pub live: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpgradeView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: BTreeMap<String, f64>,
    pub affordable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoleculeView {
    pub key: String,
    pub name: String,
    pub formula: String,
    pub description: String,
    pub unlocked: bool,
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabSnapshot {
    pub paused: bool,
    pub spawn_amount: u32,
    pub reaction_bonus: f32,
    /// Discovered elements in table order.
    pub counters: Vec<CounterView>,
    pub click_chances: BTreeMap<String, f32>,
    pub auto_rates: BTreeMap<String, f64>,
    /// The listed window of available upgrades.
    pub upgrades: Vec<UpgradeView>,
    /// Unlocked molecules by unlock order, then locked ones.
    pub molecules: Vec<MoleculeView>,
}

impl LabSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
