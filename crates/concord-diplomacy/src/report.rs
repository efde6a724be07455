//! Human-readable dump of diplomatic state, for logs.

use core::fmt;

use crate::messages::MessageStore;
use crate::status::StatusStore;

/// Borrowed view that renders every status and every pending message.
///
/// ```text
/// Diplomatic statuses:
///  2 and 1: Peace
/// Diplomatic messages:
///  from 1 to 2 message: AlliesProposal
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DiplomacyReport<'a> {
    statuses: &'a StatusStore,
    messages: &'a MessageStore,
}

impl<'a> DiplomacyReport<'a> {
    /// Build a report over the two stores.
    pub const fn new(statuses: &'a StatusStore, messages: &'a MessageStore) -> Self {
        Self { statuses, messages }
    }
}

impl fmt::Display for DiplomacyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Diplomatic statuses:")?;
        for (key, status) in self.statuses.iter() {
            writeln!(f, " {} and {}: {status}", key.high(), key.low())?;
        }
        writeln!(f, "Diplomatic messages:")?;
        for message in self.messages.pending() {
            writeln!(f, " {message}")?;
        }
        Ok(())
    }
}
