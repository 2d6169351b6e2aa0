pub mod formula;
pub mod registry;
pub mod symbol;

pub use formula::parse_formula;
pub use registry::{DecayRule, ElementKind, ReactionRule, Registry};
pub use symbol::{normalize_symbol, pair_key};
