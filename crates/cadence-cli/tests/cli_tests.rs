//! CLI integration tests for cadence-cli
//!
//! Tests command parsing, output formatting, and config handling.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Helper to run the CLI with arguments and an isolated home directory
fn run_cadence(home: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cadence"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

/// Write a workload file into `dir`
fn workload(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write workload");
    path
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

const LAYERED: &str = r#"[
    {"name": "h", "resources": ["q0"]},
    {"name": "cz", "resources": ["q0", "q1"]},
    {"name": "x", "resources": ["q2"]}
]"#;

// ==================== Help & Version Tests ====================

#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    let output = run_cadence(home.path(), &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cadence"));
    assert!(stdout.contains("build"));
    assert!(stdout.contains("partition"));
    assert!(stdout.contains("merge"));
    assert!(stdout.contains("frontier"));
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    let output = run_cadence(home.path(), &["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cadence"));
}

#[test]
fn test_cli_unknown_strategy() {
    let dir = TempDir::new().unwrap();
    let path = workload(&dir, "w.json", LAYERED);
    let output = run_cadence(
        dir.path(),
        &["build", path.to_str().unwrap(), "--strategy", "sideways"],
    );
    assert!(!output.status.success());
}

// ==================== Build Tests ====================

#[test]
fn test_build_text() {
    let dir = TempDir::new().unwrap();
    let path = workload(&dir, "w.json", LAYERED);
    let output = run_cadence(dir.path(), &["build", path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 slots, 3 operations (earliest)"));
    assert!(stdout.contains("0: h(q0) x(q2)"));
    assert!(stdout.contains("1: cz(q0, q1)"));
}

#[test]
fn test_build_json_with_strategy() {
    let dir = TempDir::new().unwrap();
    let path = workload(&dir, "w.json", LAYERED);
    let output = run_cadence(
        dir.path(),
        &["build", path.to_str().unwrap(), "--strategy", "new", "--json"],
    );
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["strategy"], "new");
    assert_eq!(json["slots"], 3);
    assert_eq!(json["operations"], 3);
    assert_eq!(json["schedule"][1][0]["name"], "cz");
}

#[test]
fn test_build_nested_body() {
    let dir = TempDir::new().unwrap();
    let path = workload(
        &dir,
        "w.json",
        r#"[
            {"name": "block", "body": [
                {"name": "h", "resources": ["q0"]},
                {"name": "cz", "resources": ["q0", "q1"]}
            ]},
            {"name": "x", "resources": ["q1"]}
        ]"#,
    );
    let output = run_cadence(dir.path(), &["build", path.to_str().unwrap(), "--json"]);
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["slots"], 2);
    assert_eq!(json["schedule"][0][0]["body"].as_array().map(|a| a.len()), Some(2));
}

#[test]
fn test_build_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    let output = run_cadence(dir.path(), &["build", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_build_error_json() {
    let dir = TempDir::new().unwrap();
    let path = workload(&dir, "w.json", r#"[{"name": "h"}]"#);
    let output = run_cadence(dir.path(), &["build", path.to_str().unwrap(), "--json"]);
    assert!(!output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("no resources"));
}

// ==================== Partition & Merge Tests ====================

#[test]
fn test_partition() {
    let dir = TempDir::new().unwrap();
    let path = workload(&dir, "w.json", LAYERED);
    let output = run_cadence(dir.path(), &["partition", path.to_str().unwrap(), "--json"]);
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["partitions"], 2);
    assert_eq!(json["resource_sets"][0], serde_json::json!(["q0", "q1"]));
    assert_eq!(json["factors"].as_array().map(|a| a.len()), Some(2));
}

#[test]
fn test_merge_zip_and_tetris() {
    let dir = TempDir::new().unwrap();
    let a = workload(&dir, "a.json", r#"[{"name": "h", "resources": ["q0"]}, {"name": "x", "resources": ["q0"]}]"#);
    let b = workload(&dir, "b.json", r#"[{"name": "y", "resources": ["q1"]}]"#);

    let zip = run_cadence(
        dir.path(),
        &["merge", a.to_str().unwrap(), b.to_str().unwrap(), "--json"],
    );
    assert!(zip.status.success());
    let json = json_stdout(&zip);
    assert_eq!(json["mode"], "zip");
    assert_eq!(json["slots"], 2);

    let tetris = run_cadence(
        dir.path(),
        &[
            "merge",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--mode",
            "tetris",
            "--align",
            "right",
            "--json",
        ],
    );
    assert!(tetris.status.success());
    let json = json_stdout(&tetris);
    assert_eq!(json["align"], "right");
    assert_eq!(json["slots"], 2);
    assert_eq!(json["schedule"][1].as_array().map(|a| a.len()), Some(2));
}

#[test]
fn test_merge_collision() {
    let dir = TempDir::new().unwrap();
    let a = workload(&dir, "a.json", r#"[{"name": "h", "resources": ["q0"]}]"#);
    let output = run_cadence(dir.path(), &["merge", a.to_str().unwrap(), a.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("q0"));
}

// ==================== Frontier Tests ====================

#[test]
fn test_frontier_stops_at_blocker() {
    let dir = TempDir::new().unwrap();
    let path = workload(
        &dir,
        "w.json",
        r#"[
            {"name": "h", "resources": ["q0"]},
            {"name": "cz", "resources": ["q0", "q1"]},
            {"name": "m", "resources": ["q0"]},
            {"name": "x", "resources": ["q1"]}
        ]"#,
    );
    let output = run_cadence(
        dir.path(),
        &[
            "frontier",
            path.to_str().unwrap(),
            "--start",
            "q0=0,q1=0",
            "--blocker",
            "m",
            "--json",
        ],
    );
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["end"]["q0"], 2);
    assert_eq!(json["end"]["q1"], 3);
    let names: Vec<&str> = json["operations"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|op| op["name"].as_str())
        .collect();
    assert!(names.contains(&"cz"));
    assert!(!names.contains(&"m"));
}

#[test]
fn test_frontier_bad_start() {
    let dir = TempDir::new().unwrap();
    let path = workload(&dir, "w.json", LAYERED);
    let output = run_cadence(
        dir.path(),
        &["frontier", path.to_str().unwrap(), "--start", "q0"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("resource=index"));
}

// ==================== Config Tests ====================

#[test]
fn test_config_show_defaults() {
    let home = TempDir::new().unwrap();
    let output = run_cadence(home.path(), &["config", "--show", "--json"]);
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["default_strategy"], "earliest");
    assert_eq!(json["default_alignment"], "left");
    assert_eq!(json["log_level"], "warn");
}

#[test]
fn test_config_set_is_used_by_build() {
    let home = TempDir::new().unwrap();
    let output = run_cadence(home.path(), &["config", "--set-strategy", "new"]);
    assert!(output.status.success());
    assert!(home.path().join(".cadence").join("config.toml").exists());

    let shown = run_cadence(home.path(), &["config", "--show", "--json"]);
    assert_eq!(json_stdout(&shown)["default_strategy"], "new");

    let path = workload(&home, "w.json", LAYERED);
    let built = run_cadence(home.path(), &["build", path.to_str().unwrap(), "--json"]);
    assert_eq!(json_stdout(&built)["slots"], 3);
}

#[test]
fn test_config_without_flags() {
    let home = TempDir::new().unwrap();
    let output = run_cadence(home.path(), &["config"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--show"));
}
