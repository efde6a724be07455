//! Client synchronization over a broadcast channel.
//!
//! [`BroadcastSink`] plugs into [`DiplomacyState`] and fans every change
//! event out on a [`tokio::sync::broadcast`] channel. A [`SyncConsumer`]
//! drains the channel between turns and works out which empires need a fresh
//! [`ClientUpdate`]. A consumer that falls behind the channel capacity
//! cannot know what it missed, so it resynchronizes everyone.

use std::collections::BTreeSet;

use concord_diplomacy::{DiplomacyEvent, DiplomacyEventSink, DiplomacyState, MessageSnapshot};
use concord_types::{DiplomaticStatusUpdate, EmpireId};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, warn};

/// Event sink that publishes every change on a broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<DiplomacyEvent>,
}

impl BroadcastSink {
    /// Create a sink whose channel holds up to `capacity` unread events.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Attach a new consumer. It sees only events sent after this call.
    pub fn subscribe(&self) -> SyncConsumer {
        SyncConsumer {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of attached consumers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl DiplomacyEventSink for BroadcastSink {
    fn on_event(&mut self, event: &DiplomacyEvent) {
        // send only fails when nobody is subscribed.
        let receivers = self.tx.send(*event).unwrap_or(0);
        debug!(?event, receivers, "Diplomacy event broadcast");
    }
}

/// Empires whose client view is out of date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dirty {
    /// Only these empires changed.
    Empires(BTreeSet<EmpireId>),
    /// Events were lost; every empire must be resent.
    Everyone,
}

impl Dirty {
    /// Whether nothing needs to be resent.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Empires(set) if set.is_empty())
    }

    /// Resolve to concrete empires against the full roster.
    pub fn resolve(self, roster: &BTreeSet<EmpireId>) -> BTreeSet<EmpireId> {
        match self {
            Self::Empires(set) => set.intersection(roster).copied().collect(),
            Self::Everyone => roster.clone(),
        }
    }
}

/// Receiving end of a [`BroadcastSink`].
#[derive(Debug)]
pub struct SyncConsumer {
    rx: broadcast::Receiver<DiplomacyEvent>,
}

impl SyncConsumer {
    /// Take every queued event and return the empires they touched.
    pub fn drain(&mut self) -> Dirty {
        let mut dirty = BTreeSet::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => dirty.extend(event.empires()),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Sync consumer lagged, resending all empires");
                    // Empty the rest so the next drain starts fresh.
                    while self.rx.try_recv().is_ok() {}
                    return Dirty::Everyone;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        dirty.remove(&EmpireId::ALL_EMPIRES);
        Dirty::Empires(dirty)
    }
}

/// JSON payload pushed to one player after a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientUpdate {
    /// The player this update is for.
    pub empire: EmpireId,
    /// Message slots the player sends or receives.
    pub messages: MessageSnapshot,
    /// Relationships the player is part of.
    pub statuses: Vec<DiplomaticStatusUpdate>,
}

impl ClientUpdate {
    /// Build the update for `empire` from the current state.
    ///
    /// For [`EmpireId::ALL_EMPIRES`] this is the server-wide view: every
    /// slot and every relationship.
    pub fn build<S: DiplomacyEventSink>(state: &DiplomacyState<S>, empire: EmpireId) -> Self {
        let statuses = state
            .status_updates()
            .into_iter()
            .filter(|u| empire.is_all() || u.empire1 == empire || u.empire2 == empire)
            .collect();
        Self {
            empire,
            messages: state.snapshot(empire),
            statuses,
        }
    }

    /// Serialize for the wire.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Build one [`ClientUpdate`] per empire in `dirty`, followed by the
/// server-wide update when anything changed.
pub fn collect_updates<S: DiplomacyEventSink>(
    state: &DiplomacyState<S>,
    dirty: Dirty,
    roster: &BTreeSet<EmpireId>,
) -> Vec<ClientUpdate> {
    let empires = dirty.resolve(roster);
    if empires.is_empty() {
        return Vec::new();
    }
    empires
        .into_iter()
        .chain(std::iter::once(EmpireId::ALL_EMPIRES))
        .map(|empire| ClientUpdate::build(state, empire))
        .collect()
}

#[cfg(test)]
mod tests {
    use concord_diplomacy::DiplomacyConfig;
    use concord_types::{DiplomaticMessage, DiplomaticStatus};

    use super::*;

    const A: EmpireId = EmpireId::new(1);
    const B: EmpireId = EmpireId::new(2);
    const C: EmpireId = EmpireId::new(3);

    fn roster() -> BTreeSet<EmpireId> {
        [A, B, C].into_iter().collect()
    }

    fn session(capacity: usize) -> (DiplomacyState<BroadcastSink>, SyncConsumer) {
        let sink = BroadcastSink::new(capacity);
        let consumer = sink.subscribe();
        let mut state = DiplomacyState::with_sink(DiplomacyConfig::default(), sink);
        state.reset_diplomacy(roster());
        (state, consumer)
    }

    #[test]
    fn drain_collects_touched_empires() {
        let (mut state, mut consumer) = session(16);
        state.handle_message(DiplomaticMessage::peace_proposal(A, B));

        let dirty = consumer.drain();
        assert_eq!(dirty, Dirty::Empires([A, B].into_iter().collect()));
        assert!(consumer.drain().is_clean());
    }

    #[test]
    fn lagging_consumer_resyncs_everyone() {
        let (mut state, mut consumer) = session(1);
        state.handle_message(DiplomaticMessage::peace_proposal(A, B));
        state.handle_message(DiplomaticMessage::peace_proposal(C, A));
        state.handle_message(DiplomaticMessage::war_declaration(B, C));

        assert_eq!(consumer.drain(), Dirty::Everyone);
        assert!(consumer.drain().is_clean());
    }

    #[test]
    fn sink_without_consumers_does_not_fail() {
        let mut state = DiplomacyState::with_sink(DiplomacyConfig::default(), BroadcastSink::new(4));
        state.reset_diplomacy(roster());
        assert!(state.set_status(A, B, DiplomaticStatus::Peace));
        assert_eq!(state.sink().receiver_count(), 0);
    }

    #[test]
    fn dirty_resolves_against_roster() {
        let stray: BTreeSet<_> = [A, EmpireId::new(99)].into_iter().collect();
        assert_eq!(
            Dirty::Empires(stray).resolve(&roster()),
            [A].into_iter().collect()
        );
        assert_eq!(Dirty::Everyone.resolve(&roster()), roster());
    }

    #[test]
    fn client_update_is_scoped_to_the_player() {
        let (mut state, mut consumer) = session(16);
        state.handle_message(DiplomaticMessage::peace_proposal(A, B));
        state.handle_message(DiplomaticMessage::peace_proposal(C, B));

        let updates = collect_updates(&state, consumer.drain(), &roster());
        assert_eq!(updates.len(), 4);
        assert_eq!(updates.last().map(|u| u.empire), Some(EmpireId::ALL_EMPIRES));
        assert_eq!(updates.last().map(|u| u.statuses.len()), Some(3));

        let for_a = updates.iter().find(|u| u.empire == A);
        assert_eq!(for_a.map(|u| u.messages.len()), Some(1));
        assert_eq!(for_a.map(|u| u.statuses.len()), Some(2));
        assert!(for_a.is_some_and(|u| u
            .statuses
            .iter()
            .all(|s| s.empire1 == A || s.empire2 == A)));
    }

    #[test]
    fn nothing_dirty_publishes_nothing() {
        let (state, mut consumer) = session(16);
        assert!(collect_updates(&state, consumer.drain(), &roster()).is_empty());
    }

    #[test]
    fn client_update_serializes() {
        let (mut state, _consumer) = session(16);
        state.handle_message(DiplomaticMessage::peace_proposal(A, B));

        let json = ClientUpdate::build(&state, B).to_json().ok();
        let value: Option<serde_json::Value> =
            json.and_then(|j| serde_json::from_str(&j).ok());
        assert_eq!(
            value.as_ref().map(|v| v["empire"].clone()),
            Some(serde_json::json!(2))
        );
        assert_eq!(
            value.map(|v| v["messages"]["entries"][0]["message_type"].clone()),
            Some(serde_json::json!("PeaceProposal"))
        );
    }
}
