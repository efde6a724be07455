//! The empire registry collaborator.
//!
//! Empires are created and destroyed elsewhere. Diplomacy only needs the
//! current set of ids (to seed relationships) and an existence check (to
//! refuse messages from or to empires that are gone).

use std::collections::BTreeSet;

use concord_types::{DiplomaticMessage, EmpireId};

use crate::error::DiplomacyError;

/// Source of the live set of empires.
pub trait EmpireRegistry {
    /// Every empire currently in the game.
    fn empire_ids(&self) -> BTreeSet<EmpireId>;

    /// Whether `id` is a live empire.
    fn contains(&self, id: EmpireId) -> bool {
        self.empire_ids().contains(&id)
    }
}

impl EmpireRegistry for BTreeSet<EmpireId> {
    fn empire_ids(&self) -> BTreeSet<EmpireId> {
        self.clone()
    }

    fn contains(&self, id: EmpireId) -> bool {
        Self::contains(self, &id)
    }
}

/// Check that `message` is between two distinct live empires.
///
/// # Errors
///
/// Returns [`DiplomacyError::BroadcastParticipant`] if either side is the
/// all-empires sentinel, [`DiplomacyError::SelfAddressed`] if sender and
/// recipient match, or [`DiplomacyError::UnknownEmpire`] for the first side
/// the registry does not know.
pub fn validate_participants<R>(registry: &R, message: &DiplomaticMessage) -> Result<(), DiplomacyError>
where
    R: EmpireRegistry + ?Sized,
{
    if message.sender.is_all() || message.recipient.is_all() {
        return Err(DiplomacyError::BroadcastParticipant);
    }
    if message.sender == message.recipient {
        return Err(DiplomacyError::SelfAddressed(message.sender));
    }
    for id in [message.sender, message.recipient] {
        if !registry.contains(id) {
            return Err(DiplomacyError::UnknownEmpire(id));
        }
    }
    Ok(())
}
