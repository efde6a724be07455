//! Enumeration types for diplomacy.
//!
//! Neither enum has an "invalid" member. A degenerate relationship query is
//! answered with `None`, and an empty or withdrawn message slot is `None`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Relationship status
// ---------------------------------------------------------------------------

/// The relationship between an unordered pair of empires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DiplomaticStatus {
    /// Open hostilities. Every pair starts here after a reset.
    War,
    /// No hostilities, no alliance.
    Peace,
    /// Formal alliance.
    Allied,
}

impl DiplomaticStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 3] = [Self::War, Self::Peace, Self::Allied];

    /// The word used for this status in human-readable reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::War => "War",
            Self::Peace => "Peace",
            Self::Allied => "Allied",
        }
    }
}

impl core::fmt::Display for DiplomaticStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Message kinds
// ---------------------------------------------------------------------------

/// The kind of a diplomatic message sent from one empire to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DiplomaticMessageType {
    /// Go from peace to war.
    WarDeclaration,
    /// Offer to end a war.
    PeaceProposal,
    /// Accept the other side's pending peace proposal.
    AcceptPeaceProposal,
    /// Offer an alliance to an empire at peace.
    AlliesProposal,
    /// Accept the other side's pending alliance proposal.
    AcceptAlliesProposal,
    /// Leave an alliance, returning to peace.
    EndAllianceDeclaration,
    /// Withdraw the sender's own pending proposal.
    CancelProposal,
    /// Refuse a proposal; clears both directions.
    RejectProposal,
}

impl DiplomaticMessageType {
    /// Every message kind, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::WarDeclaration,
        Self::PeaceProposal,
        Self::AcceptPeaceProposal,
        Self::AlliesProposal,
        Self::AcceptAlliesProposal,
        Self::EndAllianceDeclaration,
        Self::CancelProposal,
        Self::RejectProposal,
    ];

    /// Whether a message of this kind waits in a slot for the recipient's
    /// answer.
    pub const fn is_proposal(self) -> bool {
        matches!(self, Self::PeaceProposal | Self::AlliesProposal)
    }

    /// Stable name used in logs and reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WarDeclaration => "WarDeclaration",
            Self::PeaceProposal => "PeaceProposal",
            Self::AcceptPeaceProposal => "AcceptPeaceProposal",
            Self::AlliesProposal => "AlliesProposal",
            Self::AcceptAlliesProposal => "AcceptAlliesProposal",
            Self::EndAllianceDeclaration => "EndAllianceDeclaration",
            Self::CancelProposal => "CancelProposal",
            Self::RejectProposal => "RejectProposal",
        }
    }
}

impl core::fmt::Display for DiplomaticMessageType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_words() {
        assert_eq!(DiplomaticStatus::War.to_string(), "War");
        assert_eq!(DiplomaticStatus::Peace.to_string(), "Peace");
        assert_eq!(DiplomaticStatus::Allied.to_string(), "Allied");
    }

    #[test]
    fn only_two_kinds_are_proposals() {
        let proposals: Vec<_> = DiplomaticMessageType::ALL
            .into_iter()
            .filter(|kind| kind.is_proposal())
            .collect();
        assert_eq!(
            proposals,
            vec![
                DiplomaticMessageType::PeaceProposal,
                DiplomaticMessageType::AlliesProposal,
            ]
        );
    }

    #[test]
    fn display_matches_serde_name() {
        for kind in DiplomaticMessageType::ALL {
            let json = serde_json::to_string(&kind).ok();
            assert_eq!(json, Some(format!("\"{kind}\"")));
        }
    }

    #[test]
    fn unknown_message_kind_fails_to_parse() {
        let parsed: Result<DiplomaticMessageType, _> = serde_json::from_str("\"Invalid\"");
        assert!(parsed.is_err());
    }
}
