/*!
 * Tunables Loading Tests
 * JSON files and environment overrides
 */

use lowmem_killer::config::{ENV_ADJ, ENV_COST, ENV_MINFREE, ENV_PRESSURE_MODE};
use lowmem_killer::{ConfigError, ParameterStore, PressureMode, Scenario, Tunables};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::io::Write;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_json_file_with_partial_fields() {
    let file = write_temp(r#"{ "adj": [0, 8], "minfree": [1024, 4096], "pressure_mode": "split" }"#);
    let t = Tunables::from_json_file(file.path()).unwrap();

    assert_eq!(t.adj, vec![0, 8]);
    assert_eq!(t.minfree, vec![1024, 4096]);
    assert_eq!(t.pressure_mode, PressureMode::Split);
    assert_eq!(t.cost, 32);
    assert_eq!(t.debug_level, 2);
}

#[test]
fn test_json_file_rejects_oversized_array() {
    let file = write_temp(r#"{ "minfree": [1, 2, 3, 4, 5, 6, 7] }"#);
    assert!(matches!(
        Tunables::from_json_file(file.path()),
        Err(ConfigError::TooManyEntries { given: 7, .. })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    assert!(matches!(
        Tunables::from_json_file("/nonexistent/lmk.json"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let file = write_temp("{ adj: ");
    assert!(matches!(
        Tunables::from_json_file(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
#[serial]
fn test_env_overrides() {
    std::env::set_var(ENV_ADJ, "0,6,12");
    std::env::set_var(ENV_MINFREE, "2048,8192");
    std::env::set_var(ENV_COST, "16");
    std::env::set_var(ENV_PRESSURE_MODE, "combined");

    let result = Tunables::default().with_env_overrides();

    std::env::remove_var(ENV_ADJ);
    std::env::remove_var(ENV_MINFREE);
    std::env::remove_var(ENV_COST);
    std::env::remove_var(ENV_PRESSURE_MODE);

    let t = result.unwrap();
    assert_eq!(t.adj, vec![0, 6, 12]);
    assert_eq!(t.cost, 16);
    assert_eq!(t.threshold_table().len(), 2);
}

#[test]
#[serial]
fn test_bad_env_override_is_reported() {
    std::env::set_var(ENV_PRESSURE_MODE, "eager");
    let result = Tunables::default().with_env_overrides();
    std::env::remove_var(ENV_PRESSURE_MODE);

    assert_eq!(
        result.unwrap_err(),
        ConfigError::UnknownPressureMode("eager".to_string())
    );
}

#[test]
fn test_store_rejects_invalid_tunables() {
    let t = Tunables {
        adj: vec![5000],
        ..Tunables::default()
    };
    assert!(ParameterStore::new(t).is_err());
}

#[test]
fn test_scenario_file() {
    let file = write_temp(
        r#"{
            "counters": { "free": 2048, "active_anon": 9000 },
            "processes": [
                { "pid": 7, "comm": "app", "oom_score_adj": 12, "resident_pages": 300 },
                { "pid": 2, "comm": "kthreadd", "kernel_thread": true, "oom_score_adj": 0, "resident_pages": null }
            ]
        }"#,
    );
    let scenario = Scenario::from_json_file(file.path()).unwrap();
    assert_eq!(scenario.counters.free, 2048);
    assert_eq!(scenario.processes.len(), 2);
    assert!(scenario.processes[1].kernel_thread);
    assert!(!scenario.processes[0].memdie);
}
