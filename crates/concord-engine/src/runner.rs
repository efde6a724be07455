//! Turn-by-turn scenario replay.
//!
//! Each scripted message is decoded, checked against the empire registry,
//! and handed to [`DiplomacyState::handle_message`]. After every turn the
//! sync consumer is drained and the affected players receive a fresh
//! [`ClientUpdate`] through the caller's [`UpdateSink`].

use concord_diplomacy::{DiplomacyState, Negotiation, validate_participants};
use tracing::{info, warn};

use crate::scenario::{Scenario, decode_message};
use crate::sync::{BroadcastSink, ClientUpdate, Dirty, SyncConsumer, collect_updates};

/// Destination for per-turn client updates.
pub trait UpdateSink {
    /// Called once per affected player after `turn`, then once for the
    /// server-wide view. Turn 0 is the initial state after reset.
    fn on_update(&mut self, turn: usize, update: &ClientUpdate);
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpUpdates;

impl UpdateSink for NoOpUpdates {
    fn on_update(&mut self, _turn: usize, _update: &ClientUpdate) {}
}

impl UpdateSink for Vec<ClientUpdate> {
    fn on_update(&mut self, _turn: usize, update: &ClientUpdate) {
        self.push(update.clone());
    }
}

/// Counts of what happened to the scripted messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Turns replayed.
    pub turns: usize,
    /// Messages that changed state.
    pub applied: usize,
    /// Well-formed messages the rules ignored.
    pub ignored: usize,
    /// Messages naming an unknown, broadcast, or self recipient.
    pub rejected: usize,
    /// Payloads that did not decode.
    pub malformed: usize,
    /// Client updates published.
    pub updates: usize,
}

/// Drives a [`DiplomacyState`] through a [`Scenario`].
#[derive(Debug)]
pub struct ScenarioRunner {
    state: DiplomacyState<BroadcastSink>,
    consumer: SyncConsumer,
}

impl ScenarioRunner {
    /// Wrap `state`, subscribing to its broadcast sink.
    pub fn new(state: DiplomacyState<BroadcastSink>) -> Self {
        let consumer = state.sink().subscribe();
        Self { state, consumer }
    }

    /// The diplomacy state being driven.
    pub const fn state(&self) -> &DiplomacyState<BroadcastSink> {
        &self.state
    }

    /// Reset diplomacy for the scenario's empires and replay every turn.
    pub fn run<U: UpdateSink>(&mut self, scenario: &Scenario, updates: &mut U) -> ReplaySummary {
        let roster = scenario.registry();
        self.state.reset_from_registry(&roster);
        // Reset raises no events; every player gets an initial view.
        let initial = collect_updates(&self.state, Dirty::Everyone, &roster);
        for update in &initial {
            updates.on_update(0, update);
        }
        self.consumer.drain();
        let mut summary = ReplaySummary {
            updates: initial.len(),
            ..ReplaySummary::default()
        };

        for (index, turn) in scenario.turns.iter().enumerate() {
            let number = index.saturating_add(1);
            for raw in &turn.messages {
                let message = match decode_message(raw) {
                    Ok(message) => message,
                    Err(e) => {
                        warn!(turn = number, error = %e, "Dropping malformed diplomatic message");
                        summary.malformed = summary.malformed.saturating_add(1);
                        continue;
                    }
                };
                if let Err(e) = validate_participants(&roster, &message) {
                    warn!(turn = number, %message, error = %e, "Rejecting diplomatic message");
                    summary.rejected = summary.rejected.saturating_add(1);
                    continue;
                }
                match self.state.handle_message(message) {
                    Negotiation::Apply(_) => summary.applied = summary.applied.saturating_add(1),
                    Negotiation::Ignored(_) => summary.ignored = summary.ignored.saturating_add(1),
                }
            }

            let dirty = self.consumer.drain();
            let published = collect_updates(&self.state, dirty, &roster);
            for update in &published {
                updates.on_update(number, update);
            }
            summary.updates = summary.updates.saturating_add(published.len());
            summary.turns = number;
            info!(turn = number, updates = published.len(), "Turn complete");
        }

        info!(
            turns = summary.turns,
            applied = summary.applied,
            ignored = summary.ignored,
            rejected = summary.rejected,
            malformed = summary.malformed,
            "Scenario replay finished"
        );
        summary
    }
}
