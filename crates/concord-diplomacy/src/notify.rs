//! Change notification for the status and message stores.
//!
//! A [`DiplomacyEvent`] is produced only by a write that actually changed a
//! stored value. [`crate::DiplomacyState`] forwards each one to its
//! [`DiplomacyEventSink`]; what the sink does with it (re-serialize for
//! clients, record for tests, broadcast) is up to the implementation.

use concord_types::EmpireId;
use serde::{Deserialize, Serialize};

/// A value-changing write to one of the diplomacy stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiplomacyEvent {
    /// The relationship between two empires changed.
    StatusChanged {
        /// First empire, as passed to the write.
        empire1: EmpireId,
        /// Second empire, as passed to the write.
        empire2: EmpireId,
    },
    /// The message slot from `sender` to `recipient` changed.
    MessageChanged {
        /// Sending side of the slot.
        sender: EmpireId,
        /// Receiving side of the slot.
        recipient: EmpireId,
    },
}

impl DiplomacyEvent {
    /// The two empires touched by this event.
    pub const fn empires(self) -> [EmpireId; 2] {
        match self {
            Self::StatusChanged { empire1, empire2 } => [empire1, empire2],
            Self::MessageChanged { sender, recipient } => [sender, recipient],
        }
    }

    /// Whether `empire` is one of the two empires touched.
    pub const fn involves(self, empire: EmpireId) -> bool {
        let [first, second] = self.empires();
        first.0 == empire.0 || second.0 == empire.0
    }
}

/// Receiver of diplomacy change events.
pub trait DiplomacyEventSink {
    /// Called once per value-changing write, in write order.
    fn on_event(&mut self, event: &DiplomacyEvent);
}

impl<S: DiplomacyEventSink + ?Sized> DiplomacyEventSink for &mut S {
    fn on_event(&mut self, event: &DiplomacyEvent) {
        (**self).on_event(event);
    }
}

impl<S: DiplomacyEventSink + ?Sized> DiplomacyEventSink for Box<S> {
    fn on_event(&mut self, event: &DiplomacyEvent) {
        (**self).on_event(event);
    }
}

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl DiplomacyEventSink for NoOpSink {
    fn on_event(&mut self, _event: &DiplomacyEvent) {}
}

/// A sink that records every event in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<DiplomacyEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events recorded so far, oldest first.
    pub fn events(&self) -> &[DiplomacyEvent] {
        &self.events
    }

    /// Remove and return every recorded event.
    pub fn take(&mut self) -> Vec<DiplomacyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of recorded status changes.
    pub fn status_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DiplomacyEvent::StatusChanged { .. }))
            .count()
    }

    /// Number of recorded message slot changes.
    pub fn message_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DiplomacyEvent::MessageChanged { .. }))
            .count()
    }
}

impl DiplomacyEventSink for EventLog {
    fn on_event(&mut self, event: &DiplomacyEvent) {
        self.events.push(*event);
    }
}
