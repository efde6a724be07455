//! Replays the bundled demo scenario end to end.

use std::path::Path;

use concord_diplomacy::{DiplomacyConfig, DiplomacyState};
use concord_engine::{BroadcastSink, ClientUpdate, EngineConfig, Scenario, ScenarioRunner};
use concord_types::{DiplomaticStatus, EmpireId};

const A: EmpireId = EmpireId::new(1);
const B: EmpireId = EmpireId::new(2);
const C: EmpireId = EmpireId::new(3);

fn workspace_file(relative: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

#[test]
fn demo_config_parses() {
    let config = EngineConfig::from_file(&workspace_file("concord-config.yaml")).ok();
    assert_eq!(
        config.map(|c| c.diplomacy),
        Some(DiplomacyConfig::default())
    );
}

#[test]
fn demo_scenario_replays() {
    let scenario = Scenario::from_file(&workspace_file("scenarios/peace-talks.yaml")).ok();
    assert!(scenario.is_some());
    let Some(scenario) = scenario else { return };

    let mut runner = ScenarioRunner::new(DiplomacyState::with_sink(
        DiplomacyConfig::default(),
        BroadcastSink::new(256),
    ));
    let mut updates: Vec<ClientUpdate> = Vec::new();
    let summary = runner.run(&scenario, &mut updates);

    assert_eq!(summary.turns, 5);
    assert_eq!(summary.applied, 8);
    assert_eq!(summary.ignored, 2);
    assert_eq!(summary.rejected, 2);
    assert_eq!(summary.malformed, 1);
    assert_eq!(summary.updates, updates.len());

    // Peace, alliance, broken alliance, then war again.
    let state = runner.state();
    for (x, y) in [(A, B), (A, C), (B, C)] {
        assert_eq!(state.status(x, y), Some(DiplomaticStatus::War));
    }
    assert_eq!(state.messages().pending().count(), 0);

    // Every player saw an initial view, and the server view closes each
    // published turn.
    for empire in [A, B, C] {
        assert!(updates.iter().any(|u| u.empire == empire));
    }
    assert_eq!(updates.last().map(|u| u.empire), Some(EmpireId::ALL_EMPIRES));
}
