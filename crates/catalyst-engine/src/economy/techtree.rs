//! Molecule unlocks.
//!
//! Each recipe needs `atoms x scale` of every element in its formula. A
//! recipe unlocks the first time the bank covers all of it and stays
//! unlocked for the rest of the session.

use serde::{Deserialize, Serialize};

use super::bank::CounterStore;
use crate::chemistry::{normalize_symbol, parse_formula};
use crate::error::ChemError;

const MOLECULES_JSON: &str = include_str!("../../data/molecules.json");

#[derive(Debug, Deserialize)]
struct RawMolecule {
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    formula: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct MoleculesFile {
    molecules: Vec<RawMolecule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeRecipe {
    /// Underscore formula key, e.g. `C_6_H_12_O_6`.
    pub key: String,
    pub name: String,
    /// Display formula, e.g. `C₆H₁₂O₆`.
    pub formula: String,
    pub description: String,
    /// Required bank amount per element, in formula order.
    pub required: Vec<(String, u64)>,
    pub unlocked: bool,
}

impl MoleculeRecipe {
    /// Derive requirements from the key's formula.
    pub fn from_key(key: &str, scale: u32) -> Result<Self, ChemError> {
        let required = parse_formula(key)?
            .into_iter()
            .map(|(symbol, atoms)| (normalize_symbol(&symbol), atoms as u64 * scale as u64))
            .collect();
        Ok(Self {
            key: key.to_string(),
            name: key.to_string(),
            formula: key.replace('_', ""),
            description: String::new(),
            required,
            unlocked: false,
        })
    }

    /// Whether the bank meets every requirement.
    pub fn satisfied_by(&self, bank: &CounterStore) -> bool {
        self.required
            .iter()
            .all(|(symbol, need)| bank.get(symbol) >= *need as f64)
    }
}

/// Per-element progress toward a recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requirement {
    pub symbol: String,
    pub have: f64,
    pub need: u64,
}

pub struct Techtree {
    recipes: Vec<MoleculeRecipe>,
    unlock_order: Vec<usize>,
}

impl Techtree {
    /// Load the built-in molecule catalog.
    pub fn load(scale: u32) -> Result<Self, ChemError> {
        Self::from_json(MOLECULES_JSON, scale)
    }

    pub fn from_json(json: &str, scale: u32) -> Result<Self, ChemError> {
        let file: MoleculesFile = serde_json::from_str(json)?;
        let recipes = file
            .molecules
            .into_iter()
            .map(|raw| {
                let mut recipe = MoleculeRecipe::from_key(&raw.key, scale)?;
                if !raw.name.is_empty() {
                    recipe.name = raw.name;
                }
                if !raw.formula.is_empty() {
                    recipe.formula = raw.formula;
                }
                recipe.description = raw.description;
                Ok(recipe)
            })
            .collect::<Result<Vec<_>, ChemError>>()?;
        Ok(Self::new(recipes))
    }

    pub fn new(recipes: Vec<MoleculeRecipe>) -> Self {
        Self {
            recipes,
            unlock_order: Vec::new(),
        }
    }

    /// Unlock every locked recipe the bank now satisfies, in catalog order.
    /// Returns `(key, unlock position)` for each newly unlocked recipe.
    pub fn evaluate(&mut self, bank: &CounterStore) -> Vec<(String, usize)> {
        let mut unlocked = Vec::new();
        for (idx, recipe) in self.recipes.iter_mut().enumerate() {
            if recipe.unlocked || !recipe.satisfied_by(bank) {
                continue;
            }
            recipe.unlocked = true;
            let order = self.unlock_order.len();
            self.unlock_order.push(idx);
            log::info!("molecule unlocked: {} ({})", recipe.name, recipe.key);
            unlocked.push((recipe.key.clone(), order));
        }
        unlocked
    }

    pub fn get(&self, key: &str) -> Option<&MoleculeRecipe> {
        self.recipes.iter().find(|r| r.key == key)
    }

    pub fn is_unlocked(&self, key: &str) -> bool {
        self.get(key).is_some_and(|r| r.unlocked)
    }

    /// All recipes in catalog order.
    pub fn recipes(&self) -> &[MoleculeRecipe] {
        &self.recipes
    }

    /// Unlocked recipes in the order they unlocked.
    pub fn unlocked(&self) -> impl Iterator<Item = &MoleculeRecipe> {
        self.unlock_order.iter().map(|&i| &self.recipes[i])
    }

    /// Unlocked recipes by unlock order, then locked ones by catalog order.
    pub fn display_order(&self) -> Vec<&MoleculeRecipe> {
        self.unlocked()
            .chain(self.recipes.iter().filter(|r| !r.unlocked))
            .collect()
    }

    /// `have` vs `need` for each element of a recipe.
    pub fn progress(&self, key: &str, bank: &CounterStore) -> Option<Vec<Requirement>> {
        let recipe = self.get(key)?;
        Some(
            recipe
                .required
                .iter()
                .map(|(symbol, need)| Requirement {
                    symbol: symbol.clone(),
                    have: bank.get(symbol),
                    need: *need,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_like() -> Techtree {
        // H_2_O at scale 5 needs H 10, O 5
        Techtree::new(vec![MoleculeRecipe::from_key("H_2_O", 5).unwrap()])
    }

    #[test]
    fn builtin_catalog_loads() {
        let tree = Techtree::load(5).unwrap();
        assert_eq!(tree.recipes().len(), 37);
        let glucose = tree.get("C_6_H_12_O_6").unwrap();
        assert_eq!(glucose.name, "Glucose");
        assert_eq!(
            glucose.required,
            vec![("C".to_string(), 30), ("H".to_string(), 60), ("O".to_string(), 30)]
        );
    }

    #[test]
    fn unlocks_only_when_all_met() {
        let mut tree = water_like();
        let mut bank = CounterStore::new();

        bank.increment("H", 10.0);
        assert!(tree.evaluate(&bank).is_empty());

        let mut bank = CounterStore::new();
        bank.increment("O", 5.0);
        assert!(tree.evaluate(&bank).is_empty());

        bank.increment("H", 10.0);
        assert_eq!(tree.evaluate(&bank), vec![("H_2_O".to_string(), 0)]);
        assert!(tree.is_unlocked("H_2_O"));
    }

    #[test]
    fn unlock_is_monotonic() {
        let mut tree = water_like();
        let mut bank = CounterStore::new();
        bank.increment("H", 10.0);
        bank.increment("O", 5.0);
        tree.evaluate(&bank);

        bank.spend("H", 10.0);
        bank.spend("O", 5.0);
        for _ in 0..3 {
            assert!(tree.evaluate(&bank).is_empty());
            assert!(tree.is_unlocked("H_2_O"));
        }
    }

    #[test]
    fn simultaneous_unlocks_follow_catalog_order() {
        let mut tree = Techtree::new(vec![
            MoleculeRecipe::from_key("O_2", 5).unwrap(),
            MoleculeRecipe::from_key("H_2", 5).unwrap(),
            MoleculeRecipe::from_key("C_O", 5).unwrap(),
        ]);
        let mut bank = CounterStore::new();
        bank.increment("H", 10.0);
        bank.increment("O", 10.0);
        let got = tree.evaluate(&bank);
        assert_eq!(got, vec![("O_2".to_string(), 0), ("H_2".to_string(), 1)]);

        bank.increment("C", 5.0);
        assert_eq!(tree.evaluate(&bank), vec![("C_O".to_string(), 2)]);
    }

    #[test]
    fn display_order_puts_unlocked_first() {
        let mut tree = Techtree::new(vec![
            MoleculeRecipe::from_key("O_2", 5).unwrap(),
            MoleculeRecipe::from_key("H_2", 5).unwrap(),
            MoleculeRecipe::from_key("N_2", 5).unwrap(),
        ]);
        let mut bank = CounterStore::new();
        bank.increment("N", 10.0);
        tree.evaluate(&bank);
        bank.increment("H", 10.0);
        tree.evaluate(&bank);

        let keys: Vec<&str> = tree.display_order().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["N_2", "H_2", "O_2"]);
    }

    #[test]
    fn unreadable_counts_fail_the_catalog() {
        let json = r#"{"molecules": [{"key": "H_99999999999"}]}"#;
        assert!(matches!(
            Techtree::from_json(json, 5),
            Err(ChemError::InvalidFormula { .. })
        ));
        let json = r#"{"molecules": [{"key": "H_4000000000_H_4000000000"}]}"#;
        assert!(Techtree::from_json(json, 5).is_err());
    }

    #[test]
    fn progress_reports_have_and_need() {
        let tree = water_like();
        let mut bank = CounterStore::new();
        bank.increment("H", 3.0);
        let p = tree.progress("H_2_O", &bank).unwrap();
        assert_eq!(p[0], Requirement { symbol: "H".into(), have: 3.0, need: 10 });
        assert_eq!(p[1], Requirement { symbol: "O".into(), have: 0.0, need: 5 });
        assert!(tree.progress("nope", &bank).is_none());
    }
}
