//! Scripted diplomacy scenarios.
//!
//! A scenario names the empires in the game and, turn by turn, the messages
//! they send. Messages are kept as raw YAML until replay so that one
//! malformed entry (an unknown message kind, a missing field) is dropped on
//! its own instead of failing the whole file, the same way a transport
//! would drop an undecodable packet.
//!
//! ```yaml
//! empires: [1, 2, 3]
//! turns:
//!   - messages:
//!       - { sender: 1, recipient: 2, message_type: PeaceProposal }
//!   - messages:
//!       - { sender: 2, recipient: 1, message_type: AcceptPeaceProposal }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use concord_types::{DiplomaticMessage, EmpireId};
use serde::Deserialize;

/// Errors that can occur when loading a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Failed to read the scenario file from disk.
    #[error("failed to read scenario file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The file is not a scenario document.
    #[error("failed to parse scenario YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A scenario needs at least two empires to have any diplomacy.
    #[error("scenario lists {count} distinct empire(s); at least two are required")]
    TooFewEmpires {
        /// Number of distinct, non-sentinel empires listed.
        count: usize,
    },
}

impl From<serde_yml::Error> for ScenarioError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// One turn of scripted messages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Turn {
    /// Raw message payloads, decoded one at a time during replay.
    #[serde(default)]
    pub messages: Vec<serde_yml::Value>,
}

/// A scripted game.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Empires taking part.
    pub empires: Vec<EmpireId>,
    /// Turns to replay, in order.
    #[serde(default)]
    pub turns: Vec<Turn>,
}

impl Scenario {
    /// Load a scenario from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] if the file cannot be read, and the
    /// errors of [`Scenario::parse`] otherwise.
    pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Yaml`] if the document does not have the
    /// scenario shape, or [`ScenarioError::TooFewEmpires`] if fewer than two
    /// distinct empires are listed.
    pub fn parse(yaml: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_yml::from_str(yaml)?;
        let count = scenario.registry().len();
        if count < 2 {
            return Err(ScenarioError::TooFewEmpires { count });
        }
        Ok(scenario)
    }

    /// The set of live empires, usable as an
    /// [`EmpireRegistry`](concord_diplomacy::EmpireRegistry).
    pub fn registry(&self) -> BTreeSet<EmpireId> {
        self.empires
            .iter()
            .copied()
            .filter(|id| !id.is_all())
            .collect()
    }
}

/// Decode one raw scripted message.
///
/// # Errors
///
/// Returns the YAML error when the payload is not a valid message, for
/// example because its `message_type` is not a known kind.
pub fn decode_message(raw: &serde_yml::Value) -> Result<DiplomaticMessage, serde_yml::Error> {
    serde_yml::from_value(raw.clone())
}
