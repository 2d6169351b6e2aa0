/// Input the lab understands. The host pushes these between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click or tap at chamber-local coordinates of world `world`.
    PointerDown { world: u32, x: f32, y: f32 },
    /// A UI action. `kind` is one of `custom_kinds`; `a`, `b`, `c` carry
    /// its arguments.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    pub fn custom(kind: u32, a: f32) -> Self {
        InputEvent::Custom { kind, a, b: 0.0, c: 0.0 }
    }
}

/// Custom event kinds.
pub mod custom_kinds {
    /// `a != 0` opens the modal (pausing the lab), `a == 0` closes it.
    pub const SET_MODAL: u32 = 1;
    /// Move every body in world `a` back to storage.
    pub const COLLECT_ALL: u32 = 2;
    /// Advance the spawn-from-storage batch size.
    pub const CYCLE_SPAWN_AMOUNT: u32 = 3;
}

/// Pending input, drained by the runner once per frame.
///
/// The queue is bounded: while it is full, further pointer events are
/// dropped so a stalled tab cannot replay a burst of clicks. Custom events
/// are always kept.
pub struct InputQueue {
    pending: Vec<InputEvent>,
    max_pointer: usize,
    pointer_count: usize,
    dropped: usize,
}

impl InputQueue {
    pub const DEFAULT_MAX_POINTER: usize = 64;

    pub fn new() -> Self {
        Self::with_pointer_limit(Self::DEFAULT_MAX_POINTER)
    }

    pub fn with_pointer_limit(max_pointer: usize) -> Self {
        Self {
            pending: Vec::with_capacity(32),
            max_pointer,
            pointer_count: 0,
            dropped: 0,
        }
    }

    /// Queue an event. Returns false if it was dropped.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if let InputEvent::PointerDown { .. } = event {
            if self.pointer_count >= self.max_pointer {
                self.dropped += 1;
                return false;
            }
            self.pointer_count += 1;
        }
        self.pending.push(event);
        true
    }

    /// Take every pending event in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        if self.dropped > 0 {
            log::debug!("input queue dropped {} pointer events", self.dropped);
            self.dropped = 0;
        }
        self.pointer_count = 0;
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
