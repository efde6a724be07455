//! Empire identifiers.
//!
//! Empires are owned by an external registry; this crate only needs an
//! opaque, copyable handle. [`EmpireId::ALL_EMPIRES`] is the reserved
//! "no specific empire" value used for unfiltered views and is never a
//! member of a relationship pair.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Unique identifier for an empire (player or faction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EmpireId(pub i32);

impl EmpireId {
    /// Sentinel meaning "no specific empire" / "every empire".
    pub const ALL_EMPIRES: Self = Self(-1);

    /// Create an identifier from its raw value.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Return the raw integer value.
    pub const fn into_inner(self) -> i32 {
        self.0
    }

    /// Whether this is the [`EmpireId::ALL_EMPIRES`] sentinel.
    pub const fn is_all(self) -> bool {
        self.0 == Self::ALL_EMPIRES.0
    }
}

impl core::fmt::Display for EmpireId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for EmpireId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl From<EmpireId> for i32 {
    fn from(id: EmpireId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_recognized() {
        assert!(EmpireId::ALL_EMPIRES.is_all());
        assert!(!EmpireId::new(0).is_all());
        assert!(!EmpireId::new(7).is_all());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&EmpireId::new(42)).ok();
        assert_eq!(json.as_deref(), Some("42"));

        let back: Result<EmpireId, _> = serde_json::from_str("-1");
        assert_eq!(back.ok(), Some(EmpireId::ALL_EMPIRES));
    }

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(EmpireId::new(12).to_string(), "12");
    }
}
