use thiserror::Error;

/// Errors surfaced by the lab. All of them are local to one call: the
/// simulation itself never fails, and a rejected call leaves state untouched.
#[derive(Error, Debug)]
pub enum ChemError {
    /// A symbol that is not in the element table.
    #[error("unknown element '{0}'")]
    UnknownElement(String),

    /// The bank does not cover the upgrade's cost.
    #[error("cannot afford upgrade '{id}'")]
    CannotAfford { id: String },

    /// No available upgrade has this id (never existed or already bought).
    #[error("upgrade '{0}' not found")]
    UpgradeNotFound(String),

    /// Not enough banked elements outside the simulation to materialize.
    #[error("only {have} {symbol} in storage, {need} requested")]
    InsufficientStorage { symbol: String, have: u64, need: u64 },

    /// World index out of range.
    #[error("no world with id {0}")]
    UnknownWorld(usize),

    /// A molecule key whose atom counts cannot be read.
    #[error("bad formula '{key}': {reason}")]
    InvalidFormula { key: String, reason: String },

    /// An embedded or caller-supplied data table failed to parse.
    #[error("data table error: {0}")]
    Data(#[from] serde_json::Error),
}
