//! The proposal/acceptance protocol.
//!
//! [`negotiate`] decides what an incoming message does, given only the
//! current status of the pair and the kind of message pending in the
//! opposite direction. It does not touch any store; the caller applies the
//! returned [`Transition`].
//!
//! # Rules
//!
//! | Message                  | Legal when                                     | Effect                            |
//! |--------------------------|------------------------------------------------|-----------------------------------|
//! | `WarDeclaration`         | status is `Peace`                              | clear both slots, status `War`    |
//! | `PeaceProposal`          | status is `War`, nothing pending in reverse    | store as pending                  |
//! | `PeaceProposal`          | status is `War`, reverse is `PeaceProposal`    | clear both slots, status `Peace`  |
//! | `AcceptPeaceProposal`    | reverse is `PeaceProposal`                     | clear both slots, status `Peace`  |
//! | `AlliesProposal`         | status is `Peace`, nothing pending in reverse  | store as pending                  |
//! | `AlliesProposal`         | status is `Peace`, reverse is `AlliesProposal` | clear both slots, status `Allied` |
//! | `AcceptAlliesProposal`   | reverse is `AlliesProposal`                    | clear both slots, status `Allied` |
//! | `EndAllianceDeclaration` | status is `Allied`                             | clear both slots, status `Peace`  |
//! | `CancelProposal`         | always                                         | clear the sender's slot           |
//! | `RejectProposal`         | always                                         | clear both slots                  |
//!
//! Anything else is ignored. A war declaration between allies is ignored:
//! an alliance has to be ended first.

use concord_types::{DiplomaticMessage, DiplomaticMessageType, DiplomaticStatus};

/// Store changes implied by a legal message.
///
/// Applied in field order: slots are cleared first, then the incoming
/// message is stored, then the status is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Clear the slot from the sender to the recipient.
    pub clear_forward: bool,
    /// Clear the slot from the recipient to the sender.
    pub clear_reverse: bool,
    /// Store the incoming message as pending.
    pub store_pending: bool,
    /// New status of the pair.
    pub new_status: Option<DiplomaticStatus>,
}

impl Transition {
    /// Leave the message waiting for an answer.
    const PENDING: Self = Self {
        clear_forward: false,
        clear_reverse: false,
        store_pending: true,
        new_status: None,
    };

    /// Withdraw the sender's own proposal.
    const CANCEL: Self = Self {
        clear_forward: true,
        clear_reverse: false,
        store_pending: false,
        new_status: None,
    };

    /// Clear both directions without touching the status.
    const REJECT: Self = Self {
        clear_forward: true,
        clear_reverse: true,
        store_pending: false,
        new_status: None,
    };

    /// Clear both directions and move the pair to `status`.
    const fn settle(status: DiplomaticStatus) -> Self {
        Self {
            clear_forward: true,
            clear_reverse: true,
            store_pending: false,
            new_status: Some(status),
        }
    }
}

/// Why a message had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The pair is not in the status this message requires.
    WrongStatus {
        /// Status the message needs.
        required: DiplomaticStatus,
        /// Current status, `None` for a degenerate or missing pair.
        actual: Option<DiplomaticStatus>,
    },
    /// A different message is already pending from the recipient.
    ReverseSlotOccupied(DiplomaticMessageType),
    /// An acceptance arrived with no matching proposal to accept.
    NothingToAccept,
}

impl core::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WrongStatus {
                required,
                actual: Some(actual),
            } => write!(f, "requires {required} but pair is at {actual}"),
            Self::WrongStatus {
                required,
                actual: None,
            } => write!(f, "requires {required} but pair has no status"),
            Self::ReverseSlotOccupied(kind) => {
                write!(f, "recipient already has {kind} pending")
            }
            Self::NothingToAccept => f.write_str("no matching proposal to accept"),
        }
    }
}

/// Result of running a message through [`negotiate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negotiation {
    /// The message is legal; apply the transition.
    Apply(Transition),
    /// The message is not legal right now and changes nothing.
    Ignored(IgnoreReason),
}

impl Negotiation {
    /// Whether the message had an effect.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Apply(_))
    }
}

/// Decide the effect of `message`.
///
/// `status` is the current status of the pair and `reverse` the kind of
/// message pending from the recipient back to the sender.
pub fn negotiate(
    message: DiplomaticMessage,
    status: Option<DiplomaticStatus>,
    reverse: Option<DiplomaticMessageType>,
) -> Negotiation {
    use DiplomaticMessageType as Kind;
    use DiplomaticStatus as Status;

    match message.message_type {
        Kind::WarDeclaration => require(status, Status::Peace, Transition::settle(Status::War)),
        Kind::PeaceProposal => propose(status, Status::War, reverse, Kind::PeaceProposal, Status::Peace),
        Kind::AcceptPeaceProposal => accept(reverse, Kind::PeaceProposal, Status::Peace),
        Kind::AlliesProposal => propose(status, Status::Peace, reverse, Kind::AlliesProposal, Status::Allied),
        Kind::AcceptAlliesProposal => accept(reverse, Kind::AlliesProposal, Status::Allied),
        Kind::EndAllianceDeclaration => {
            require(status, Status::Allied, Transition::settle(Status::Peace))
        }
        Kind::CancelProposal => Negotiation::Apply(Transition::CANCEL),
        Kind::RejectProposal => Negotiation::Apply(Transition::REJECT),
    }
}

fn require(
    actual: Option<DiplomaticStatus>,
    required: DiplomaticStatus,
    then: Transition,
) -> Negotiation {
    if actual == Some(required) {
        Negotiation::Apply(then)
    } else {
        Negotiation::Ignored(IgnoreReason::WrongStatus { required, actual })
    }
}

/// A proposal is stored while the reverse slot is empty and settles the
/// pair at once when the other side has already proposed the same thing.
fn propose(
    actual: Option<DiplomaticStatus>,
    required: DiplomaticStatus,
    reverse: Option<DiplomaticMessageType>,
    kind: DiplomaticMessageType,
    settles_to: DiplomaticStatus,
) -> Negotiation {
    if actual != Some(required) {
        return Negotiation::Ignored(IgnoreReason::WrongStatus { required, actual });
    }
    match reverse {
        None => Negotiation::Apply(Transition::PENDING),
        Some(pending) if pending == kind => {
            Negotiation::Apply(Transition::settle(settles_to))
        }
        Some(pending) => Negotiation::Ignored(IgnoreReason::ReverseSlotOccupied(pending)),
    }
}

fn accept(
    reverse: Option<DiplomaticMessageType>,
    proposal: DiplomaticMessageType,
    settles_to: DiplomaticStatus,
) -> Negotiation {
    match reverse {
        Some(pending) if pending == proposal => {
            Negotiation::Apply(Transition::settle(settles_to))
        }
        _ => Negotiation::Ignored(IgnoreReason::NothingToAccept),
    }
}
