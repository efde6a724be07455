//! Read-only projections of the stores for transport.
//!
//! A connected player only ever sees the message slots they send or
//! receive. The server (viewer [`EmpireId::ALL_EMPIRES`]) sees every slot,
//! withdrawn ones included.

use concord_types::{
    DiplomaticMessage, DiplomaticMessageType, DiplomaticStatusUpdate, EmpireId,
};
use serde::{Deserialize, Serialize};

use crate::messages::MessageStore;
use crate::status::StatusStore;

/// One message slot as seen by a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Sending side of the slot.
    pub sender: EmpireId,
    /// Receiving side of the slot.
    pub recipient: EmpireId,
    /// Pending message kind, `None` once withdrawn.
    pub message_type: Option<DiplomaticMessageType>,
}

impl SnapshotEntry {
    /// The pending message, if the slot is not empty.
    pub fn message(&self) -> Option<DiplomaticMessage> {
        self.message_type
            .map(|kind| DiplomaticMessage::new(self.sender, self.recipient, kind))
    }
}

/// Message slots visible to one viewer, ordered by `(sender, recipient)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSnapshot {
    /// Who the snapshot was taken for.
    pub viewer: EmpireId,
    /// Visible slots.
    pub entries: Vec<SnapshotEntry>,
}

impl MessageSnapshot {
    /// The entry for the slot from `sender` to `recipient`, if visible.
    pub fn get(&self, sender: EmpireId, recipient: EmpireId) -> Option<&SnapshotEntry> {
        self.entries
            .iter()
            .find(|e| e.sender == sender && e.recipient == recipient)
    }

    /// Messages still pending among the visible slots.
    pub fn pending(&self) -> impl Iterator<Item = DiplomaticMessage> + '_ {
        self.entries.iter().filter_map(SnapshotEntry::message)
    }

    /// Number of visible slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no slot is visible.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Project `messages` for `viewer`.
///
/// With [`EmpireId::ALL_EMPIRES`] every slot is included; otherwise only
/// slots where the viewer is sender or recipient.
pub fn message_snapshot(messages: &MessageStore, viewer: EmpireId) -> MessageSnapshot {
    let entries = messages
        .slots()
        .filter(|(key, _)| viewer.is_all() || key.involves(viewer))
        .map(|(key, message_type)| SnapshotEntry {
            sender: key.sender(),
            recipient: key.recipient(),
            message_type,
        })
        .collect();
    MessageSnapshot { viewer, entries }
}

/// Every stored relationship as a status update, ordered by pair.
pub fn status_updates(statuses: &StatusStore) -> Vec<DiplomaticStatusUpdate> {
    statuses
        .iter()
        .map(|(key, status)| DiplomaticStatusUpdate {
            empire1: key.high(),
            empire2: key.low(),
            status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use concord_types::DiplomaticStatus;

    use super::*;

    const A: EmpireId = EmpireId::new(1);
    const B: EmpireId = EmpireId::new(2);
    const C: EmpireId = EmpireId::new(3);

    fn store() -> MessageStore {
        let mut store = MessageStore::new();
        let _ = store.set(DiplomaticMessage::peace_proposal(A, B));
        let _ = store.set(DiplomaticMessage::allies_proposal(B, C));
        let _ = store.set(DiplomaticMessage::peace_proposal(C, A));
        let _ = store.remove(C, A);
        store
    }

    #[test]
    fn player_sees_only_own_slots() {
        let snap = message_snapshot(&store(), A);
        assert_eq!(snap.viewer, A);
        assert_eq!(snap.len(), 2);
        assert!(snap.entries.iter().all(|e| e.sender == A || e.recipient == A));
        assert!(snap.get(B, C).is_none());
    }

    #[test]
    fn server_sees_everything_including_withdrawn() {
        let snap = message_snapshot(&store(), EmpireId::ALL_EMPIRES);
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.get(C, A).map(|e| e.message_type), Some(None));
        assert_eq!(snap.pending().count(), 2);
    }

    #[test]
    fn outsider_sees_nothing() {
        let snap = message_snapshot(&store(), EmpireId::new(99));
        assert!(snap.is_empty());
    }

    #[test]
    fn snapshot_wire_shape() {
        let mut messages = MessageStore::new();
        let _ = messages.set(DiplomaticMessage::peace_proposal(A, B));
        let json = serde_json::to_value(message_snapshot(&messages, B)).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({
                "viewer": 2,
                "entries": [
                    { "sender": 1, "recipient": 2, "message_type": "PeaceProposal" }
                ]
            }))
        );
    }

    #[test]
    fn status_updates_list_each_pair_high_first() {
        let mut statuses = StatusStore::new();
        statuses.reset_all([A, B, C], DiplomaticStatus::War);
        let updates = status_updates(&statuses);
        assert_eq!(updates.len(), 3);
        assert!(updates.iter().all(|u| u.empire1 > u.empire2));
        assert!(updates.iter().all(|u| u.status == DiplomaticStatus::War));
    }
}
