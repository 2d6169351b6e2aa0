use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::ChemError;

/// Size of one simulation chamber.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WorldSpec {
    pub width: f32,
    pub height: f32,
}

/// Reaction and click-push constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Combined speed below which collisions get no reaction bonus.
    pub reaction_speed_threshold: f32,
    /// Combined speed at which the bonus saturates.
    pub reaction_speed_max: f32,
    /// Largest probability bonus a fast collision can add.
    pub reaction_speed_bonus_max: f32,
    /// Click push radius in world units.
    pub push_radius: f32,
    pub push_strength: f32,
    /// Exponent on the linear falloff `(1 - d/R)`.
    pub push_falloff: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reaction_speed_threshold: 2.5,
            reaction_speed_max: 12.0,
            reaction_speed_bonus_max: 0.35,
            push_radius: 120.0,
            push_strength: 6.0,
            push_falloff: 1.6,
        }
    }
}

/// Lab configuration. Every field has a default; a host may override any
/// subset through `LabConfig::from_json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Fixed simulation timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Chambers created at startup, in order.
    pub worlds: Vec<WorldSpec>,
    pub tuning: Tuning,
    /// Live sparks per world (default: 256).
    pub max_sparks: usize,
    /// Sparks per click (default: 8).
    pub click_sparks: usize,
    /// Sparks per reaction (default: 14).
    pub reaction_sparks: usize,
    /// Starting per-symbol click spawn chances.
    pub initial_click_chances: BTreeMap<String, f32>,
    /// Bank quantity required per atom in a molecule recipe (default: 5).
    pub recipe_scale: u32,
    /// Batch sizes cycled by the "spawn amount" control.
    pub spawn_amounts: Vec<u32>,
    /// Materialized bodies land within +/- this many units of the centre.
    pub storage_jitter: f32,
    /// How many available upgrades the UI lists at once.
    pub upgrade_window: usize,
    /// Fixed RNG seed; the web runner seeds from the clock when absent.
    pub rng_seed: Option<u64>,
    /// Whether showing a discovery opens the modal (and so pauses).
    pub discovery_pauses: bool,
}

impl Default for LabConfig {
    fn default() -> Self {
        let mut initial_click_chances = BTreeMap::new();
        initial_click_chances.insert("H".to_string(), 0.1);
        Self {
            fixed_dt: 1.0 / 60.0,
            worlds: vec![
                WorldSpec { width: 600.0, height: 600.0 },
                WorldSpec { width: 500.0, height: 200.0 },
                WorldSpec { width: 500.0, height: 200.0 },
                WorldSpec { width: 500.0, height: 200.0 },
            ],
            tuning: Tuning::default(),
            max_sparks: 256,
            click_sparks: 8,
            reaction_sparks: 14,
            initial_click_chances,
            recipe_scale: 5,
            spawn_amounts: vec![1, 4, 8],
            storage_jitter: 40.0,
            upgrade_window: 6,
            rng_seed: None,
            discovery_pauses: true,
        }
    }
}

impl LabConfig {
    /// Parse overrides; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ChemError> {
        Ok(serde_json::from_str(json)?)
    }
}
