//! Store keys for relationship pairs and message slots.
//!
//! [`StatusKey`] is unordered: `(a, b)` and `(b, a)` address the same
//! relationship. [`MessageKey`] is ordered: a message from `a` to `b` and
//! one from `b` to `a` live in separate slots. Both can only be built from
//! two distinct empires, neither of which is [`EmpireId::ALL_EMPIRES`].

use concord_types::EmpireId;
use serde::{Deserialize, Serialize};

/// Canonical key of an unordered pair of distinct empires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatusKey {
    high: EmpireId,
    low: EmpireId,
}

impl StatusKey {
    /// Build the key for the pair `a`, `b`.
    ///
    /// Returns `None` for a self-pair or when either side is the
    /// all-empires sentinel.
    pub const fn new(a: EmpireId, b: EmpireId) -> Option<Self> {
        if a.is_all() || b.is_all() || a.0 == b.0 {
            return None;
        }
        if a.0 > b.0 {
            Some(Self { high: a, low: b })
        } else {
            Some(Self { high: b, low: a })
        }
    }

    /// The larger id of the pair.
    pub const fn high(self) -> EmpireId {
        self.high
    }

    /// The smaller id of the pair.
    pub const fn low(self) -> EmpireId {
        self.low
    }

    /// Whether `empire` is one side of this pair.
    pub const fn contains(self, empire: EmpireId) -> bool {
        self.high.0 == empire.0 || self.low.0 == empire.0
    }

    /// The side of the pair that is not `empire`, if `empire` is in it.
    pub const fn other(self, empire: EmpireId) -> Option<EmpireId> {
        if self.high.0 == empire.0 {
            Some(self.low)
        } else if self.low.0 == empire.0 {
            Some(self.high)
        } else {
            None
        }
    }
}

/// Key of a directional message slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageKey {
    sender: EmpireId,
    recipient: EmpireId,
}

impl MessageKey {
    /// Build the key for messages from `sender` to `recipient`.
    ///
    /// Returns `None` for a self-addressed slot or when either side is the
    /// all-empires sentinel.
    pub const fn new(sender: EmpireId, recipient: EmpireId) -> Option<Self> {
        if sender.is_all() || recipient.is_all() || sender.0 == recipient.0 {
            return None;
        }
        Some(Self { sender, recipient })
    }

    /// The sending empire.
    pub const fn sender(self) -> EmpireId {
        self.sender
    }

    /// The receiving empire.
    pub const fn recipient(self) -> EmpireId {
        self.recipient
    }

    /// The slot for the opposite direction.
    pub const fn reversed(self) -> Self {
        Self {
            sender: self.recipient,
            recipient: self.sender,
        }
    }

    /// Whether `empire` is the sender or the recipient.
    pub const fn involves(self, empire: EmpireId) -> bool {
        self.sender.0 == empire.0 || self.recipient.0 == empire.0
    }

    /// The unordered relationship this slot belongs to.
    pub const fn status_key(self) -> StatusKey {
        if self.sender.0 > self.recipient.0 {
            StatusKey {
                high: self.sender,
                low: self.recipient,
            }
        } else {
            StatusKey {
                high: self.recipient,
                low: self.sender,
            }
        }
    }
}
