//! Error types for the concord-diplomacy crate.
//!
//! None of these escape the negotiation core as a failure: a missing status
//! entry is reported through `tracing` and answered with `None`, and the
//! participant checks are only run by callers that want them before handing
//! a message to [`crate::DiplomacyState::handle_message`].

use concord_types::EmpireId;

/// Errors that can be detected around diplomacy operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiplomacyError {
    /// A pair of distinct, real empires has no stored status. Every such
    /// pair gets one on reset, so this is an internal consistency error.
    #[error("no diplomatic status stored for empires {a} and {b}")]
    MissingStatus {
        /// First empire of the queried pair.
        a: EmpireId,
        /// Second empire of the queried pair.
        b: EmpireId,
    },

    /// The empire is not present in the registry.
    #[error("empire {0} is not known to the registry")]
    UnknownEmpire(EmpireId),

    /// Sender and recipient are the same empire.
    #[error("empire {0} cannot address a diplomatic message to itself")]
    SelfAddressed(EmpireId),

    /// The all-empires sentinel was used as a sender or recipient.
    #[error("the all-empires sentinel cannot send or receive diplomatic messages")]
    BroadcastParticipant,
}
