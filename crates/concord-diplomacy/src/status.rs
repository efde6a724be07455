//! Relationship status per unordered pair of empires.
//!
//! After a reset every pair of distinct known empires has exactly one entry.
//! Writes are idempotent: storing the value that is already there changes
//! nothing and produces no event.

use std::collections::{BTreeMap, BTreeSet};

use concord_types::{DiplomaticStatus, EmpireId};
use tracing::error;

use crate::error::DiplomacyError;
use crate::keys::StatusKey;
use crate::notify::DiplomacyEvent;

/// Mapping from [`StatusKey`] to [`DiplomaticStatus`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusStore {
    statuses: BTreeMap<StatusKey, DiplomaticStatus>,
}

impl StatusStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            statuses: BTreeMap::new(),
        }
    }

    /// Relationship between `a` and `b`.
    ///
    /// Returns `None` without logging for a self-pair or when either id is
    /// [`EmpireId::ALL_EMPIRES`]. A well-formed pair with no entry is a
    /// consistency error: it is logged and `None` is returned.
    pub fn status(&self, a: EmpireId, b: EmpireId) -> Option<DiplomaticStatus> {
        let key = StatusKey::new(a, b)?;
        let status = self.statuses.get(&key).copied();
        if status.is_none() {
            let err = DiplomacyError::MissingStatus { a, b };
            error!(%a, %b, %err, "Diplomatic status lookup failed");
        }
        status
    }

    /// Store `status` for the pair `a`, `b`.
    ///
    /// Returns the change event when the stored value actually changed, and
    /// `None` for a no-op write or a degenerate pair.
    pub fn set_status(
        &mut self,
        a: EmpireId,
        b: EmpireId,
        status: DiplomaticStatus,
    ) -> Option<DiplomacyEvent> {
        let key = StatusKey::new(a, b)?;
        if self.status(a, b) == Some(status) {
            return None;
        }
        self.statuses.insert(key, status);
        Some(DiplomacyEvent::StatusChanged {
            empire1: a,
            empire2: b,
        })
    }

    /// Every empire that has `status` with `empire`.
    ///
    /// Empty when `empire` is [`EmpireId::ALL_EMPIRES`].
    pub fn ids_with_status(&self, empire: EmpireId, status: DiplomaticStatus) -> BTreeSet<EmpireId> {
        if empire.is_all() {
            return BTreeSet::new();
        }
        self.statuses
            .iter()
            .filter(|(_, s)| **s == status)
            .filter_map(|(key, _)| key.other(empire))
            .collect()
    }

    /// Replace the whole store with one `initial` entry per unordered pair
    /// of distinct ids in `empire_ids`.
    ///
    /// Duplicate ids and the all-empires sentinel are ignored. No events
    /// are produced.
    pub fn reset_all<I>(&mut self, empire_ids: I, initial: DiplomaticStatus)
    where
        I: IntoIterator<Item = EmpireId>,
    {
        let ids: BTreeSet<EmpireId> = empire_ids.into_iter().filter(|id| !id.is_all()).collect();
        self.statuses.clear();
        for (index, &a) in ids.iter().enumerate() {
            for &b in ids.iter().skip(index.saturating_add(1)) {
                if let Some(key) = StatusKey::new(a, b) {
                    self.statuses.insert(key, initial);
                }
            }
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.statuses.clear();
    }

    /// Iterate stored pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusKey, DiplomaticStatus)> + '_ {
        self.statuses.iter().map(|(key, status)| (*key, *status))
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Whether the store holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
