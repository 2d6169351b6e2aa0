use std::collections::{BTreeMap, HashSet};

use crate::chemistry::normalize_symbol;

/// Banked quantity per element symbol.
///
/// Amounts are non-negative reals: spending clamps at zero and
/// auto-production credits fractions. Every symbol's first ever rise above
/// zero is recorded as a discovery, exactly once per store.
#[derive(Debug, Default)]
pub struct CounterStore {
    amounts: BTreeMap<String, f64>,
    seen: HashSet<String>,
    fresh: Vec<String>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current amount; zero for symbols never credited.
    pub fn get(&self, symbol: &str) -> f64 {
        self.amounts.get(&normalize_symbol(symbol)).copied().unwrap_or(0.0)
    }

    /// Add `amount` and return the new total. Non-positive or non-finite
    /// amounts are ignored.
    pub fn increment(&mut self, symbol: &str, amount: f64) -> f64 {
        let symbol = normalize_symbol(symbol);
        let entry = self.amounts.entry(symbol.clone()).or_insert(0.0);
        if !(amount.is_finite() && amount > 0.0) {
            return *entry;
        }
        let prev = *entry;
        *entry += amount;
        let next = *entry;

        if prev <= 0.0 && next > 0.0 && self.seen.insert(symbol.clone()) {
            self.fresh.push(symbol);
        }
        next
    }

    /// Subtract `amount`, never going below zero. Returns the new total.
    pub fn spend(&mut self, symbol: &str, amount: f64) -> f64 {
        let symbol = normalize_symbol(symbol);
        let current = self.amounts.get(&symbol).copied().unwrap_or(0.0);
        if !(amount.is_finite() && amount > 0.0) {
            return current;
        }
        let next = (current - amount).max(0.0);
        self.amounts.insert(symbol, next);
        next
    }

    /// Whether this symbol has ever been credited.
    pub fn is_discovered(&self, symbol: &str) -> bool {
        self.seen.contains(&normalize_symbol(symbol))
    }

    /// Symbols discovered since the last call, in discovery order.
    pub fn take_discoveries(&mut self) -> Vec<String> {
        std::mem::take(&mut self.fresh)
    }

    /// Iterate `(symbol, amount)` in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.amounts.iter().map(|(s, &n)| (s.as_str(), n))
    }
}
