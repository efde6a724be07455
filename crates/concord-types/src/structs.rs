//! Diplomatic message and status update payloads.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DiplomaticMessageType, DiplomaticStatus};
use crate::ids::EmpireId;

/// A message sent from one empire to another.
///
/// Two messages are equal when sender, recipient, and kind all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DiplomaticMessage {
    /// The empire that sent the message.
    pub sender: EmpireId,
    /// The empire the message is addressed to.
    pub recipient: EmpireId,
    /// What the message asks for or announces.
    pub message_type: DiplomaticMessageType,
}

impl DiplomaticMessage {
    /// Create a message of an arbitrary kind.
    pub const fn new(
        sender: EmpireId,
        recipient: EmpireId,
        message_type: DiplomaticMessageType,
    ) -> Self {
        Self {
            sender,
            recipient,
            message_type,
        }
    }

    /// `sender` declares war on `recipient`.
    pub const fn war_declaration(sender: EmpireId, recipient: EmpireId) -> Self {
        Self::new(sender, recipient, DiplomaticMessageType::WarDeclaration)
    }

    /// `sender` proposes peace to `recipient`.
    pub const fn peace_proposal(sender: EmpireId, recipient: EmpireId) -> Self {
        Self::new(sender, recipient, DiplomaticMessageType::PeaceProposal)
    }

    /// `sender` accepts the peace proposal `recipient` sent earlier.
    pub const fn accept_peace_proposal(sender: EmpireId, recipient: EmpireId) -> Self {
        Self::new(sender, recipient, DiplomaticMessageType::AcceptPeaceProposal)
    }

    /// `sender` proposes an alliance to `recipient`.
    pub const fn allies_proposal(sender: EmpireId, recipient: EmpireId) -> Self {
        Self::new(sender, recipient, DiplomaticMessageType::AlliesProposal)
    }

    /// `sender` accepts the alliance proposal `recipient` sent earlier.
    pub const fn accept_allies_proposal(sender: EmpireId, recipient: EmpireId) -> Self {
        Self::new(sender, recipient, DiplomaticMessageType::AcceptAlliesProposal)
    }

    /// `sender` leaves its alliance with `recipient`.
    pub const fn end_alliance_declaration(sender: EmpireId, recipient: EmpireId) -> Self {
        Self::new(sender, recipient, DiplomaticMessageType::EndAllianceDeclaration)
    }

    /// `sender` withdraws its own pending proposal to `recipient`.
    pub const fn cancel_proposal(sender: EmpireId, recipient: EmpireId) -> Self {
        Self::new(sender, recipient, DiplomaticMessageType::CancelProposal)
    }

    /// `sender` rejects whatever is pending between it and `recipient`.
    pub const fn reject_proposal(sender: EmpireId, recipient: EmpireId) -> Self {
        Self::new(sender, recipient, DiplomaticMessageType::RejectProposal)
    }
}

impl core::fmt::Display for DiplomaticMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "from {} to {} message: {}",
            self.sender, self.recipient, self.message_type
        )
    }
}

/// The current status of one pair, as sent to clients when they join or
/// when the pair changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DiplomaticStatusUpdate {
    /// The higher id of the pair.
    pub empire1: EmpireId,
    /// The lower id of the pair.
    pub empire2: EmpireId,
    /// Their relationship.
    pub status: DiplomaticStatus,
}
