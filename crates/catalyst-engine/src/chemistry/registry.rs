//! Element, reaction and decay tables.
//!
//! The tables ship as JSON embedded at compile time; `Registry::from_json`
//! accepts replacement tables from the host. Nothing mutates after load.

use serde::Deserialize;
use std::collections::HashMap;

use super::symbol::{normalize_symbol, pair_key};
use crate::components::color::ElementColor;
use crate::error::ChemError;

const ELEMENTS_JSON: &str = include_str!("../../data/elements.json");
const REACTIONS_JSON: &str = include_str!("../../data/reactions.json");

#[derive(Debug, Deserialize)]
struct RawElement {
    symbol: String,
    name: String,
    color: String,
    radius: f32,
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct ElementsFile {
    elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
struct RawReaction {
    reactants: [String; 2],
    products: Vec<String>,
    probability: f32,
    #[serde(default = "default_consumes")]
    consumes: bool,
    #[serde(default)]
    note: String,
}

#[derive(Debug, Deserialize)]
struct RawDecay {
    reactant: String,
    products: Vec<String>,
    probability: f32,
    #[serde(default)]
    note: String,
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    reactions: Vec<RawReaction>,
    #[serde(default)]
    decays: Vec<RawDecay>,
}

fn default_consumes() -> bool {
    true
}

/// Static description of one element.
#[derive(Debug, Clone)]
pub struct ElementKind {
    /// Position in the element table; doubles as a render label key.
    pub index: u32,
    pub symbol: String,
    pub name: String,
    pub color: ElementColor,
    pub radius: f32,
    pub base_speed: f32,
}

/// A pairwise reaction. Symmetric in its reactants.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRule {
    pub reactant_a: String,
    pub reactant_b: String,
    pub products: Vec<String>,
    pub base_probability: f32,
    /// When false the reactants survive and products are added alongside.
    pub consumes: bool,
    pub note: String,
}

/// A single-body decay outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayRule {
    pub reactant: String,
    pub products: Vec<String>,
    pub probability: f32,
    pub note: String,
}

/// Element registry with symbol lookup and symmetric reaction lookup.
pub struct Registry {
    elements: Vec<ElementKind>,
    by_symbol: HashMap<String, usize>,
    reactions: HashMap<(String, String), ReactionRule>,
    decays: HashMap<String, Vec<DecayRule>>,
}

impl Registry {
    /// Load the built-in tables.
    pub fn load() -> Result<Self, ChemError> {
        Self::from_json(ELEMENTS_JSON, REACTIONS_JSON)
    }

    /// Parse a registry from an element table and a rules table.
    pub fn from_json(elements_json: &str, rules_json: &str) -> Result<Self, ChemError> {
        let raw: ElementsFile = serde_json::from_str(elements_json)?;
        let mut elements = Vec::with_capacity(raw.elements.len());
        let mut by_symbol = HashMap::with_capacity(raw.elements.len());

        for raw_elem in raw.elements {
            let symbol = normalize_symbol(&raw_elem.symbol);
            let color = ElementColor::from_hex(&raw_elem.color).unwrap_or_else(|| {
                log::warn!("element {}: bad color '{}'", symbol, raw_elem.color);
                ElementColor::default()
            });
            let kind = ElementKind {
                index: elements.len() as u32,
                symbol: symbol.clone(),
                name: raw_elem.name,
                color,
                radius: raw_elem.radius.max(1.0),
                base_speed: raw_elem.speed.max(0.0),
            };
            by_symbol.insert(symbol, elements.len());
            elements.push(kind);
        }

        let mut registry = Self {
            elements,
            by_symbol,
            reactions: HashMap::new(),
            decays: HashMap::new(),
        };

        let rules: RulesFile = serde_json::from_str(rules_json)?;
        for raw in rules.reactions {
            let rule = ReactionRule {
                reactant_a: registry.checked_symbol(&raw.reactants[0])?,
                reactant_b: registry.checked_symbol(&raw.reactants[1])?,
                products: registry.checked_symbols(&raw.products)?,
                base_probability: raw.probability.clamp(0.0, 1.0),
                consumes: raw.consumes,
                note: raw.note,
            };
            let key = pair_key(&rule.reactant_a, &rule.reactant_b);
            if let Some(old) = registry.reactions.insert(key, rule) {
                log::debug!("reaction '{}' shadowed by a later rule", old.note);
            }
        }

        for raw in rules.decays {
            let rule = DecayRule {
                reactant: registry.checked_symbol(&raw.reactant)?,
                products: registry.checked_symbols(&raw.products)?,
                probability: raw.probability.clamp(0.0, 1.0),
                note: raw.note,
            };
            registry.decays.entry(rule.reactant.clone()).or_default().push(rule);
        }

        Ok(registry)
    }

    fn checked_symbol(&self, raw: &str) -> Result<String, ChemError> {
        let symbol = normalize_symbol(raw);
        if self.by_symbol.contains_key(&symbol) {
            Ok(symbol)
        } else {
            Err(ChemError::UnknownElement(symbol))
        }
    }

    fn checked_symbols(&self, raw: &[String]) -> Result<Vec<String>, ChemError> {
        raw.iter().map(|s| self.checked_symbol(s)).collect()
    }

    /// Look up an element by symbol (case-insensitive).
    pub fn get_element(&self, symbol: &str) -> Result<&ElementKind, ChemError> {
        let symbol = normalize_symbol(symbol);
        match self.by_symbol.get(&symbol) {
            Some(&idx) => Ok(&self.elements[idx]),
            None => Err(ChemError::UnknownElement(symbol)),
        }
    }

    /// Element by table index.
    pub fn element_at(&self, index: u32) -> Option<&ElementKind> {
        self.elements.get(index as usize)
    }

    /// Reaction for an unordered pair, if any.
    pub fn get_reaction(&self, a: &str, b: &str) -> Option<&ReactionRule> {
        self.reactions.get(&pair_key(a, b))
    }

    /// All decay outcomes for a symbol, in registration order.
    pub fn decays(&self, symbol: &str) -> &[DecayRule] {
        self.decays
            .get(&normalize_symbol(symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The last registered decay outcome for a symbol.
    pub fn get_decay(&self, symbol: &str) -> Option<&DecayRule> {
        self.decays(symbol).last()
    }

    /// Averaged color of two elements; white if either is unknown.
    pub fn mix_colors(&self, a: &str, b: &str) -> ElementColor {
        match (self.get_element(a), self.get_element(b)) {
            (Ok(ea), Ok(eb)) => ea.color.mix(eb.color),
            _ => ElementColor::WHITE,
        }
    }

    /// Iterate elements in table order.
    pub fn elements(&self) -> impl Iterator<Item = &ElementKind> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_builtin_tables() {
        let registry = Registry::load().expect("built-in tables should parse");
        assert_eq!(registry.len(), 99);
        assert!(registry.reaction_count() > 100);
    }

    #[test]
    fn hydrogen_properties() {
        let registry = Registry::load().unwrap();
        let h = registry.get_element("h").unwrap();
        assert_eq!(h.symbol, "H");
        assert_eq!(h.name, "Hydrogen");
        assert_eq!(h.index, 0);
        assert_eq!(h.radius, 12.0);
        assert_eq!(h.base_speed, 1.0);
    }

    #[test]
    fn unknown_element_is_an_error() {
        let registry = Registry::load().unwrap();
        match registry.get_element("Xx") {
            Err(ChemError::UnknownElement(s)) => assert_eq!(s, "Xx"),
            other => panic!("expected UnknownElement, got {:?}", other.map(|e| &e.symbol)),
        }
    }

    #[test]
    fn reaction_lookup_is_symmetric() {
        let registry = Registry::load().unwrap();
        let ab = registry.get_reaction("He", "H").unwrap();
        let ba = registry.get_reaction("h", "HE").unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.products, vec!["Li".to_string()]);
    }

    #[test]
    fn hydrogen_fuses_to_helium() {
        let registry = Registry::load().unwrap();
        let rule = registry.get_reaction("H", "H").unwrap();
        assert_eq!(rule.products, vec!["He".to_string()]);
        assert!((rule.base_probability - 0.10).abs() < 1e-6);
        assert!(rule.consumes);
    }

    #[test]
    fn missing_reaction_is_none() {
        let registry = Registry::load().unwrap();
        assert!(registry.get_reaction("Es", "Es").is_none());
        assert!(registry.get_reaction("Zz", "H").is_none());
    }

    #[test]
    fn later_duplicate_reaction_wins() {
        let elements = r##"{"elements": [
            {"symbol": "A", "name": "a", "color": "#000000", "radius": 5, "speed": 1},
            {"symbol": "B", "name": "b", "color": "#ffffff", "radius": 5, "speed": 1},
            {"symbol": "C", "name": "c", "color": "#ffffff", "radius": 5, "speed": 1}
        ]}"##;
        let rules = r#"{"reactions": [
            {"reactants": ["A", "B"], "products": ["A"], "probability": 0.5},
            {"reactants": ["B", "A"], "products": ["C"], "probability": 0.2}
        ]}"#;
        let registry = Registry::from_json(elements, rules).unwrap();
        let rule = registry.get_reaction("A", "B").unwrap();
        assert_eq!(rule.products, vec!["C".to_string()]);
        assert_eq!(registry.reaction_count(), 1);
    }

    #[test]
    fn multiple_decays_kept_in_order() {
        let registry = Registry::load().unwrap();
        let tc = registry.decays("Tc");
        assert_eq!(tc.len(), 2);
        assert_eq!(tc[0].products, vec!["Mo".to_string(), "H".to_string()]);
        assert_eq!(registry.get_decay("Tc"), tc.last());
        assert_eq!(registry.decays("U").len(), 3);
        assert!(registry.get_decay("H").is_none());
    }

    #[test]
    fn rule_with_unknown_product_fails_load() {
        let elements = r##"{"elements": [
            {"symbol": "A", "name": "a", "color": "#000000", "radius": 5, "speed": 1}
        ]}"##;
        let rules = r#"{"decays": [{"reactant": "A", "products": ["Q"], "probability": 0.1}]}"#;
        assert!(matches!(
            Registry::from_json(elements, rules),
            Err(ChemError::UnknownElement(_))
        ));
    }

    #[test]
    fn mixed_color_is_average() {
        let registry = Registry::load().unwrap();
        let h = registry.get_element("H").unwrap().color;
        let he = registry.get_element("He").unwrap().color;
        assert_eq!(registry.mix_colors("H", "He"), h.mix(he));
        assert_eq!(registry.mix_colors("H", "Nope"), ElementColor::WHITE);
    }
}
