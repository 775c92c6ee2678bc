//! # Event Log
//!
//! In-memory [`EventSink`] adapter. Collects committed events in order so
//! embedding applications and tests can inspect or drain them.

use crate::events::LedgerEvent;
use crate::ports::outbound::EventSink;
use std::sync::{Arc, Mutex};

/// Append-only in-memory event log.
#[derive(Clone, Debug, Default)]
pub struct MemoryEventLog {
    events: Vec<LedgerEvent>,
}

impl MemoryEventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected events, in publication order.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Removes and returns all collected events.
    pub fn drain(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing was published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for MemoryEventLog {
    fn publish(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&mut self, _event: LedgerEvent) {}
}

/// Shareable handle over a [`MemoryEventLog`].
///
/// Clones observe the same log, so a caller can keep one handle while the
/// engine owns another.
#[derive(Clone, Debug, Default)]
pub struct SharedEventLog {
    inner: Arc<Mutex<MemoryEventLog>>,
}

impl SharedEventLog {
    /// Creates an empty shared log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out all collected events, in publication order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LedgerEvent> {
        self.inner.lock().unwrap().events().to_vec()
    }

    /// Removes and returns all collected events.
    pub fn drain(&self) -> Vec<LedgerEvent> {
        self.inner.lock().unwrap().drain()
    }

    /// Number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Returns true if nothing was published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

impl EventSink for SharedEventLog {
    fn publish(&mut self, event: LedgerEvent) {
        self.inner.lock().unwrap().publish(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
