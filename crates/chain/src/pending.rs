//! Buffer of events awaiting the next mining round.

use landchain_core::Event;

/// Ordered buffer of pending events.
///
/// Events are kept in arrival order and are only ever consumed as a whole
/// by a mining round.
#[derive(Debug, Clone, Default)]
pub struct PendingEvents {
    events: Vec<Event>,
}

impl PendingEvents {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Borrow the pending events in arrival order.
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Copy of the pending events followed by `extra`.
    pub fn snapshot_with(&self, extra: Event) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.events.len() + 1);
        events.extend(self.events.iter().cloned());
        events.push(extra);
        events
    }

    /// Keep only the first `len` pending events.
    pub fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }

    /// Drop all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
