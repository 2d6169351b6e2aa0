use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Unique identifier for a body, stable for its whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Index of a world inside a `Lab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WorldId(pub usize);

/// Something the UI layer may want to react to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LabEvent {
    /// First time ever this symbol entered the bank.
    Discovered { symbol: String },
    /// A molecule recipe unlocked; `order` is its position in unlock order.
    Unlocked { key: String, order: usize },
    /// Two bodies reacted at `(x, y)`.
    Reaction { world: usize, note: String, x: f32, y: f32 },
    /// A body decayed at `(x, y)`.
    Decay { world: usize, note: String, x: f32, y: f32 },
    /// An upgrade was bought.
    Purchased { id: String },
    /// A purchase was refused; nothing changed.
    PurchaseRejected { id: String },
}

impl LabEvent {
    /// Flatten to the fixed-size wire form. String payloads stay in the
    /// JSON snapshot; the wire form carries kind plus coordinates.
    pub fn to_wire(&self) -> WireEvent {
        use wire_kinds::*;
        match self {
            LabEvent::Discovered { .. } => WireEvent::new(DISCOVERED, 0.0, 0.0, 0.0),
            LabEvent::Unlocked { order, .. } => WireEvent::new(UNLOCKED, *order as f32, 0.0, 0.0),
            LabEvent::Reaction { world, x, y, .. } => WireEvent::new(REACTION, *world as f32, *x, *y),
            LabEvent::Decay { world, x, y, .. } => WireEvent::new(DECAY, *world as f32, *x, *y),
            LabEvent::Purchased { .. } => WireEvent::new(PURCHASED, 0.0, 0.0, 0.0),
            LabEvent::PurchaseRejected { .. } => WireEvent::new(PURCHASE_REJECTED, 0.0, 0.0, 0.0),
        }
    }
}

/// Wire event kinds, read by the host as floats.
pub mod wire_kinds {
    pub const DISCOVERED: f32 = 1.0;
    pub const UNLOCKED: f32 = 2.0;
    pub const REACTION: f32 = 3.0;
    pub const DECAY: f32 = 4.0;
    pub const PURCHASED: f32 = 5.0;
    pub const PURCHASE_REJECTED: f32 = 6.0;
}

/// A lab event as the host reads it from linear memory.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
