//! Configuration for the diplomacy subsystem.
//!
//! The engine reads this from the `diplomacy` section of
//! `concord-config.yaml`. Every field has a default so an empty section
//! (or no section at all) reproduces the standard rules.

use concord_types::DiplomaticStatus;
use serde::Deserialize;

/// Tunables for [`crate::DiplomacyState`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiplomacyConfig {
    /// Status every pair of empires is seeded with by a diplomacy reset
    /// (default: `War`).
    #[serde(default = "default_initial_status")]
    pub initial_status: DiplomaticStatus,
}

impl Default for DiplomacyConfig {
    fn default() -> Self {
        Self {
            initial_status: default_initial_status(),
        }
    }
}

const fn default_initial_status() -> DiplomaticStatus {
    DiplomaticStatus::War
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = DiplomacyConfig::default();
        assert_eq!(cfg.initial_status, DiplomaticStatus::War);
    }

    #[test]
    fn empty_object_uses_defaults() {
        let cfg: Result<DiplomacyConfig, _> = serde_json::from_str("{}");
        assert_eq!(cfg.ok(), Some(DiplomacyConfig::default()));
    }

    #[test]
    fn initial_status_is_overridable() {
        let cfg: Result<DiplomacyConfig, _> =
            serde_json::from_str(r#"{ "initial_status": "Peace" }"#);
        assert_eq!(
            cfg.ok().map(|c| c.initial_status),
            Some(DiplomaticStatus::Peace)
        );
    }
}
