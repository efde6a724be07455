//! Pending diplomatic messages per ordered `(sender, recipient)` slot.
//!
//! A slot that once held a message keeps existing after the message is
//! withdrawn, holding `None`. That lets a removal tell whether anything was
//! actually pending, and lets the unfiltered snapshot tell clients which
//! slots to clear.

use std::collections::BTreeMap;

use concord_types::{DiplomaticMessage, DiplomaticMessageType, EmpireId};
use tracing::debug;

use crate::keys::MessageKey;
use crate::notify::DiplomacyEvent;

/// Mapping from [`MessageKey`] to the kind of message pending in that slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageStore {
    slots: BTreeMap<MessageKey, Option<DiplomaticMessageType>>,
}

impl MessageStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// The message pending from `sender` to `recipient`, if any.
    ///
    /// Absence is an ordinary state, not an error.
    pub fn get(&self, sender: EmpireId, recipient: EmpireId) -> Option<DiplomaticMessage> {
        let key = MessageKey::new(sender, recipient)?;
        self.slots
            .get(&key)
            .copied()
            .flatten()
            .map(|kind| DiplomaticMessage::new(sender, recipient, kind))
    }

    /// Whether a message is pending from `sender` to `recipient`.
    pub fn is_available(&self, sender: EmpireId, recipient: EmpireId) -> bool {
        self.get(sender, recipient).is_some()
    }

    /// Put `message` into its slot.
    ///
    /// Returns the change event when the slot's content changed. Storing
    /// the message that is already pending, or a self-addressed message,
    /// does nothing.
    pub fn set(&mut self, message: DiplomaticMessage) -> Option<DiplomacyEvent> {
        let Some(key) = MessageKey::new(message.sender, message.recipient) else {
            debug!(
                sender = %message.sender,
                recipient = %message.recipient,
                "Ignoring message with degenerate participants"
            );
            return None;
        };
        let next = Some(message.message_type);
        if self.slots.get(&key) == Some(&next) {
            return None;
        }
        self.slots.insert(key, next);
        Some(DiplomacyEvent::MessageChanged {
            sender: message.sender,
            recipient: message.recipient,
        })
    }

    /// Withdraw whatever is pending from `sender` to `recipient`.
    ///
    /// The slot is kept, emptied. Returns the change event only if a message
    /// was actually pending.
    pub fn remove(&mut self, sender: EmpireId, recipient: EmpireId) -> Option<DiplomacyEvent> {
        let key = MessageKey::new(sender, recipient)?;
        let was_pending = matches!(self.slots.insert(key, None), Some(Some(_)));
        was_pending.then_some(DiplomacyEvent::MessageChanged { sender, recipient })
    }

    /// Drop every slot, pending or withdrawn.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Iterate every slot in key order, including withdrawn ones.
    pub fn slots(&self) -> impl Iterator<Item = (MessageKey, Option<DiplomaticMessageType>)> + '_ {
        self.slots.iter().map(|(key, kind)| (*key, *kind))
    }

    /// Iterate the messages currently pending, in key order.
    pub fn pending(&self) -> impl Iterator<Item = DiplomaticMessage> + '_ {
        self.slots.iter().filter_map(|(key, kind)| {
            kind.map(|kind| DiplomaticMessage::new(key.sender(), key.recipient(), kind))
        })
    }

    /// Number of slots, pending or withdrawn.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the store has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
