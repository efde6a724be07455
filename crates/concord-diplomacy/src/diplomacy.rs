//! Diplomacy state for one game session.
//!
//! [`DiplomacyState`] owns the status and message stores and the event sink.
//! Every mutation goes through it so that each value-changing write is
//! reported to the sink exactly once, and no-op writes are not reported.
//!
//! # Concurrency
//!
//! All methods are synchronous and never block. [`DiplomacyState::handle_message`]
//! reads both stores and then writes both; a caller sharing the state across
//! threads must hold exclusive access for the whole call so two messages for
//! the same pair are never interleaved. `&mut self` makes that the default.

use std::collections::BTreeSet;

use concord_types::{DiplomaticMessage, DiplomaticStatus, DiplomaticStatusUpdate, EmpireId};
use tracing::{debug, info};

use crate::config::DiplomacyConfig;
use crate::messages::MessageStore;
use crate::negotiation::{self, Negotiation};
use crate::notify::{DiplomacyEvent, DiplomacyEventSink, NoOpSink};
use crate::registry::EmpireRegistry;
use crate::report::DiplomacyReport;
use crate::status::StatusStore;
use crate::view::{self, MessageSnapshot};

/// Relationships and pending messages between every pair of empires.
#[derive(Debug, Clone)]
pub struct DiplomacyState<S = NoOpSink> {
    config: DiplomacyConfig,
    statuses: StatusStore,
    messages: MessageStore,
    sink: S,
}

impl DiplomacyState<NoOpSink> {
    /// Create an empty state whose change events are discarded.
    pub const fn new(config: DiplomacyConfig) -> Self {
        Self::with_sink(config, NoOpSink)
    }
}

impl Default for DiplomacyState<NoOpSink> {
    fn default() -> Self {
        Self::new(DiplomacyConfig::default())
    }
}

impl<S: DiplomacyEventSink> DiplomacyState<S> {
    /// Create an empty state that reports change events to `sink`.
    pub const fn with_sink(config: DiplomacyConfig, sink: S) -> Self {
        Self {
            config,
            statuses: StatusStore::new(),
            messages: MessageStore::new(),
            sink,
        }
    }

    /// The configuration this state was created with.
    pub const fn config(&self) -> &DiplomacyConfig {
        &self.config
    }

    /// The event sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the event sink.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Read-only access to the status store.
    pub const fn statuses(&self) -> &StatusStore {
        &self.statuses
    }

    /// Read-only access to the message store.
    pub const fn messages(&self) -> &MessageStore {
        &self.messages
    }

    // -----------------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------------

    /// Relationship between `a` and `b`; `None` for a degenerate or
    /// missing pair.
    pub fn status(&self, a: EmpireId, b: EmpireId) -> Option<DiplomaticStatus> {
        self.statuses.status(a, b)
    }

    /// Every empire that has `status` with `empire`.
    pub fn ids_with_status(&self, empire: EmpireId, status: DiplomaticStatus) -> BTreeSet<EmpireId> {
        self.statuses.ids_with_status(empire, status)
    }

    /// Set the relationship between `a` and `b`.
    ///
    /// Returns whether the stored value changed. Setting the current value
    /// again is a no-op and raises no event.
    pub fn set_status(&mut self, a: EmpireId, b: EmpireId, status: DiplomaticStatus) -> bool {
        let event = self.statuses.set_status(a, b, status);
        if event.is_some() {
            info!(%a, %b, %status, "Diplomatic status changed");
        }
        self.emit(event)
    }

    // -----------------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------------

    /// Whether a message is pending from `sender` to `recipient`.
    pub fn is_message_available(&self, sender: EmpireId, recipient: EmpireId) -> bool {
        self.messages.is_available(sender, recipient)
    }

    /// The message pending from `sender` to `recipient`, if any.
    pub fn message(&self, sender: EmpireId, recipient: EmpireId) -> Option<DiplomaticMessage> {
        self.messages.get(sender, recipient)
    }

    /// Store `message` in its slot. Returns whether the slot changed.
    pub fn set_message(&mut self, message: DiplomaticMessage) -> bool {
        let event = self.messages.set(message);
        self.emit(event)
    }

    /// Withdraw the message pending from `sender` to `recipient`.
    ///
    /// Returns whether something was actually pending.
    pub fn remove_message(&mut self, sender: EmpireId, recipient: EmpireId) -> bool {
        let event = self.messages.remove(sender, recipient);
        self.emit(event)
    }

    // -----------------------------------------------------------------------
    // Negotiation
    // -----------------------------------------------------------------------

    /// Apply an incoming message according to the negotiation rules.
    ///
    /// Illegal or ill-timed messages change nothing; the returned
    /// [`Negotiation`] says why.
    pub fn handle_message(&mut self, message: DiplomaticMessage) -> Negotiation {
        let DiplomaticMessage {
            sender,
            recipient,
            message_type,
        } = message;
        let status = self.statuses.status(sender, recipient);
        let reverse = self
            .messages
            .get(recipient, sender)
            .map(|pending| pending.message_type);

        let outcome = negotiation::negotiate(message, status, reverse);
        match outcome {
            Negotiation::Ignored(reason) => {
                debug!(%sender, %recipient, %message_type, %reason, "Diplomatic message ignored");
            }
            Negotiation::Apply(transition) => {
                debug!(%sender, %recipient, %message_type, "Diplomatic message accepted");
                if transition.clear_forward {
                    self.remove_message(sender, recipient);
                }
                if transition.clear_reverse {
                    self.remove_message(recipient, sender);
                }
                if transition.store_pending {
                    self.set_message(message);
                }
                if let Some(next) = transition.new_status {
                    self.set_status(sender, recipient, next);
                }
            }
        }
        outcome
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Reseed every relationship between distinct ids in `empire_ids` with
    /// the configured initial status and drop all pending messages.
    ///
    /// This is a bulk reinitialization: no change events are raised.
    pub fn reset_diplomacy<I>(&mut self, empire_ids: I)
    where
        I: IntoIterator<Item = EmpireId>,
    {
        self.statuses.reset_all(empire_ids, self.config.initial_status);
        self.messages.clear();
        info!(
            pairs = self.statuses.len(),
            initial_status = %self.config.initial_status,
            "Diplomacy reset"
        );
    }

    /// [`Self::reset_diplomacy`] over every empire in `registry`.
    pub fn reset_from_registry<R>(&mut self, registry: &R)
    where
        R: EmpireRegistry + ?Sized,
    {
        self.reset_diplomacy(registry.empire_ids());
    }

    /// Discard both stores, as on registry teardown.
    pub fn clear(&mut self) {
        self.statuses.clear();
        self.messages.clear();
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Message slots visible to `viewer`; everything for
    /// [`EmpireId::ALL_EMPIRES`].
    pub fn snapshot(&self, viewer: EmpireId) -> MessageSnapshot {
        view::message_snapshot(&self.messages, viewer)
    }

    /// Every stored relationship as a status update.
    pub fn status_updates(&self) -> Vec<DiplomaticStatusUpdate> {
        view::status_updates(&self.statuses)
    }

    /// Human-readable dump of statuses and pending messages.
    pub const fn report(&self) -> DiplomacyReport<'_> {
        DiplomacyReport::new(&self.statuses, &self.messages)
    }

    fn emit(&mut self, event: Option<DiplomacyEvent>) -> bool {
        match event {
            Some(event) => {
                self.sink.on_event(&event);
                true
            }
            None => false,
        }
    }
}
