//! Diplomatic relations between empires for the Concord simulation.
//!
//! This crate tracks a [`DiplomaticStatus`] (war, peace, alliance) for every
//! unordered pair of empires and negotiates changes to it through typed
//! proposal and acceptance messages. It performs no I/O: the engine feeds it
//! messages, subscribes to its change events, and ships its snapshots.
//!
//! # Modules
//!
//! - [`config`] -- Tunables ([`DiplomacyConfig`])
//! - [`diplomacy`] -- Per-session state and the single message entry point ([`DiplomacyState`])
//! - [`error`] -- Error types ([`DiplomacyError`])
//! - [`keys`] -- Unordered [`StatusKey`] and ordered [`MessageKey`]
//! - [`messages`] -- Pending message slots ([`MessageStore`])
//! - [`negotiation`] -- The protocol rules ([`negotiate`])
//! - [`notify`] -- Change events and sinks ([`DiplomacyEventSink`])
//! - [`registry`] -- The empire registry collaborator ([`EmpireRegistry`])
//! - [`report`] -- Human-readable dump for logs
//! - [`status`] -- Relationship store ([`StatusStore`])
//! - [`view`] -- Per-viewer snapshots for transport
//!
//! [`DiplomaticStatus`]: concord_types::DiplomaticStatus

pub mod config;
pub mod diplomacy;
pub mod error;
pub mod keys;
pub mod messages;
pub mod negotiation;
pub mod notify;
pub mod registry;
pub mod report;
pub mod status;
pub mod view;

// Re-export primary types at crate root for convenience.
pub use config::DiplomacyConfig;
pub use diplomacy::DiplomacyState;
pub use error::DiplomacyError;
pub use keys::{MessageKey, StatusKey};
pub use messages::MessageStore;
pub use negotiation::{IgnoreReason, Negotiation, Transition, negotiate};
pub use notify::{DiplomacyEvent, DiplomacyEventSink, EventLog, NoOpSink};
pub use registry::{EmpireRegistry, validate_participants};
pub use report::DiplomacyReport;
pub use status::StatusStore;
pub use view::{MessageSnapshot, SnapshotEntry, message_snapshot, status_updates};
