use std::collections::VecDeque;

/// Holds discoveries back while a modal is open and releases them one at a
/// time, oldest first.
#[derive(Debug, Default)]
pub struct DiscoveryGate {
    modal_open: bool,
    queue: VecDeque<String>,
}

impl DiscoveryGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, symbol: String) {
        self.queue.push_back(symbol);
    }

    pub fn set_modal_open(&mut self, open: bool) {
        self.modal_open = open;
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Next discovery to show, or None while the modal is open.
    pub fn next_ready(&mut self) -> Option<String> {
        if self.modal_open {
            None
        } else {
            self.queue.pop_front()
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
