//! Diplomacy engine binary for the Concord simulation.
//!
//! Replays a scripted scenario through the diplomacy core and logs the
//! JSON update each player would receive after every turn.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `concord-config.yaml` (or `CONCORD_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Load the scenario named on the command line or in the config
//! 4. Replay it turn by turn, publishing client updates
//! 5. Log the final report and print the server-wide state as JSON

use std::path::PathBuf;

use concord_diplomacy::DiplomacyState;
use concord_engine::{
    BroadcastSink, ClientUpdate, EngineConfig, EngineError, LogFormat, LoggingConfig, Scenario,
    ScenarioRunner, UpdateSink,
};
use concord_types::EmpireId;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Logs every client update as a JSON payload.
struct LogUpdates;

impl UpdateSink for LogUpdates {
    fn on_update(&mut self, turn: usize, update: &ClientUpdate) {
        match update.to_json() {
            Ok(payload) => info!(turn, empire = %update.empire, %payload, "Client update"),
            Err(e) => warn!(turn, empire = %update.empire, error = %e, "Failed to serialize client update"),
        }
    }
}

/// Application entry point for the diplomacy engine.
///
/// # Errors
///
/// Returns an error if configuration, logging, or the scenario cannot be
/// loaded.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        initial_status = %config.diplomacy.initial_status,
        scenario_path = %config.engine.scenario_path.display(),
        "concord-engine starting"
    );

    // 3. Load scenario.
    let scenario_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| config.engine.scenario_path.clone(), PathBuf::from);
    let scenario = Scenario::from_file(&scenario_path).map_err(EngineError::from)?;
    info!(
        path = %scenario_path.display(),
        empires = scenario.registry().len(),
        turns = scenario.turns.len(),
        "Scenario loaded"
    );

    // 4. Replay.
    let sink = BroadcastSink::new(config.engine.sync_channel_capacity);
    let mut runner = ScenarioRunner::new(DiplomacyState::with_sink(config.diplomacy, sink));
    let summary = runner.run(&scenario, &mut LogUpdates);

    // 5. Report.
    info!(report = %runner.state().report(), "Final diplomacy state");
    let server_view = ClientUpdate::build(runner.state(), EmpireId::ALL_EMPIRES);
    println!(
        "{}",
        serde_json::to_string_pretty(&server_view).map_err(EngineError::from)?
    );

    info!(
        applied = summary.applied,
        ignored = summary.ignored,
        rejected = summary.rejected,
        malformed = summary.malformed,
        "concord-engine finished"
    );
    Ok(())
}

/// Load configuration, falling back to defaults if the file is absent.
fn load_config() -> Result<EngineConfig, EngineError> {
    let config_path = EngineConfig::default_path();
    if config_path.exists() {
        Ok(EngineConfig::from_file(&config_path)?)
    } else {
        // Logging is not up yet; apply env overrides to the defaults.
        Ok(EngineConfig::parse("{}")?)
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let result = match logging.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| EngineError::Logging {
        message: e.to_string(),
    })
}
