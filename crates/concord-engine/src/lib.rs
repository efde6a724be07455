//! Diplomacy engine for the Concord simulation.
//!
//! Wires the synchronous diplomacy core to the outside world: YAML
//! configuration, scripted scenario replay, and per-player client sync over
//! a broadcast channel.
//!
//! # Modules
//!
//! - [`config`] -- `concord-config.yaml` loading ([`EngineConfig`])
//! - [`error`] -- Top-level error ([`EngineError`])
//! - [`runner`] -- Turn-by-turn replay ([`ScenarioRunner`])
//! - [`scenario`] -- Scenario files ([`Scenario`])
//! - [`sync`] -- Broadcast sink and client updates ([`BroadcastSink`])

pub mod config;
pub mod error;
pub mod runner;
pub mod scenario;
pub mod sync;

pub use config::{ConfigError, EngineConfig, LogFormat, LoggingConfig, ReplayConfig};
pub use error::EngineError;
pub use runner::{NoOpUpdates, ReplaySummary, ScenarioRunner, UpdateSink};
pub use scenario::{Scenario, ScenarioError, Turn, decode_message};
pub use sync::{BroadcastSink, ClientUpdate, Dirty, SyncConsumer, collect_updates};
