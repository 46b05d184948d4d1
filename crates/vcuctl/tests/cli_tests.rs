//! Integration tests for the vcuctl binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn vcuctl() -> Command {
    Command::cargo_bin("vcuctl").unwrap()
}

fn sensors(tps: f32, bps: f32) -> Value {
    let channel = |raw: u16, lo: u16, hi: u16, travel: f32| {
        json!({ "raw": raw, "spec_min": lo, "spec_max": hi, "calibrated": true, "travel": travel })
    };
    json!({
        "tps": {
            "channels": [channel(1200, 200, 4800, tps), channel(3600, 200, 4800, tps)],
            "travel": tps
        },
        "bps": { "channel": channel(900, 500, 4500, bps), "travel": bps },
        "lv_battery_mv": 13600,
        "hvil_term_sense": true
    })
}

fn cycle(tps: f32, bps: f32, bms_power: i32, dcl: u8, torque: f32) -> Value {
    json!({
        "sensors": sensors(tps, bps),
        "bms": { "power_w": bms_power, "dcl": dcl, "ccl": 255 },
        "mcm": { "power_w": 20000, "ground_speed_kph": 50.0, "torque": torque }
    })
}

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn json_lines(stdout: &[u8]) -> Vec<Value> {
    std::str::from_utf8(stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_help_lists_commands() {
    vcuctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("thresholds"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_thresholds_prints_defaults() {
    let output = vcuctl().arg("thresholds").output().unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["lv_battery_critical_mv"], 12730);
    assert_eq!(value["power_ramp_end_w"], 80000);
    assert_eq!(value["current_limit_full_scale"], 255);
}

#[test]
fn test_check_accepts_default_thresholds() {
    let dir = TempDir::new().unwrap();
    let defaults = vcuctl().arg("thresholds").output().unwrap().stdout;
    let path = dir.path().join("thresholds.json");
    fs::write(&path, defaults).unwrap();

    vcuctl()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("thresholds are valid"));
}

#[test]
fn test_check_rejects_inconsistent_thresholds() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "bad.json",
        &json!({ "lv_battery_critical_mv": 13500, "lv_battery_low_mv": 13100 }),
    );

    vcuctl()
        .arg("check")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("lv_battery_critical_mv"));
}

#[test]
fn test_check_malformed_thresholds_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    vcuctl().arg("check").arg(&path).assert().code(2);
}

#[test]
fn test_replay_missing_file() {
    let dir = TempDir::new().unwrap();
    vcuctl()
        .arg("replay")
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn test_replay_rejects_unknown_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "scenario.json", &json!({ "cycles": [], "extra": 1 }));
    vcuctl().arg("replay").arg(&path).assert().code(3);
}

#[test]
fn test_replay_rejects_empty_scenario() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "scenario.json", &json!({ "cycles": [] }));
    vcuctl()
        .arg("replay")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("has no cycles"));
}

#[test]
fn test_replay_with_invalid_thresholds() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "scenario.json",
        &json!({
            "thresholds": { "power_ramp_start_w": 90000 },
            "cycles": [cycle(0.3, 0.0, 10000, 255, 50.0)]
        }),
    );
    vcuctl().arg("replay").arg(&path).assert().code(2);
}

#[test]
fn test_replay_human_output() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "scenario.json",
        &json!({ "cycles": [cycle(0.3, 0.0, 10000, 255, 50.0), cycle(0.5, 0.3, 10000, 255, 50.0)] }),
    );

    vcuctl()
        .arg("replay")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("unlimited"))
        .stdout(predicate::str::contains("faulted"))
        .stdout(predicate::str::contains("2 cycles, 1 unsafe"));
}

#[test]
fn test_replay_json_latch_persists_across_cycles() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "scenario.json",
        &json!({
            "cycles": [
                cycle(0.3, 0.0, 10000, 255, 50.0),
                cycle(0.3, 0.05, 10000, 255, 50.0),
                cycle(0.3, 0.0, 10000, 255, 50.0),
                cycle(0.04, 0.0, 10000, 255, 50.0),
            ]
        }),
    );

    let output = vcuctl().arg("--json").arg("replay").arg(&path).output().unwrap();
    assert!(output.status.success());

    let lines = json_lines(&output.stdout);
    assert_eq!(lines.len(), 4);
    let latched: Vec<bool> = lines.iter().map(|l| l["latched"].as_bool().unwrap()).collect();
    assert_eq!(latched, vec![false, true, true, false]);
    assert_eq!(lines[1]["faults"], 0x400);
    assert_eq!(lines[2]["torque_out"], 0.0);
    assert_eq!(lines[3]["reason"], "unlimited");
}

#[test]
fn test_replay_json_current_limit() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "scenario.json",
        &json!({ "cycles": [cycle(0.6, 0.0, 76000, 200, 100.0)] }),
    );

    let output = vcuctl().args(["replay", "--json"]).arg(&path).output().unwrap();
    assert!(output.status.success());

    let lines = json_lines(&output.stdout);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["reason"], "current-limit");
    assert_eq!(lines[0]["notices"], 0x10);
    let torque_out = lines[0]["torque_out"].as_f64().unwrap();
    assert!((torque_out - 78.431).abs() < 1e-2);
}

#[test]
fn test_json_error_output() {
    let dir = TempDir::new().unwrap();
    let output = vcuctl()
        .arg("--json")
        .arg("replay")
        .arg(dir.path().join("missing.json"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"]["message"].as_str().unwrap().contains("Cannot read"));
}
