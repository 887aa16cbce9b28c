//! E2E CLI tests covering:
//! - `power-broker score` output table, default output path and JSON summary
//! - Error contract: coded errors on stderr, nonzero exit
//! - `power-broker stats` JSON report
//! - Config file pickup from the working directory
//! - `power-broker completions`
//!
//! Each test runs the binary as a subprocess in an isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the power-broker binary, rooted in `dir`.
fn pb_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("power-broker"));
    cmd.current_dir(dir);
    cmd.env("POWER_BROKER_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

/// Three sites in a chain: a -road-> b -trade-> c.
fn write_chain(dir: &Path) {
    fs::write(dir.join("sites.csv"), "id,name\na,Alpha\nb,Beta\nc,Gamma\n").unwrap();
    fs::write(dir.join("links.csv"), "source,target,type\na,b,road\nb,c,trade\n").unwrap();
}

const CHAIN_SCORES: &str = "id,name,closeness_all_edges,closeness_no_road_edges\n\
                            a,Alpha,0.6666666666666666,0.0\n\
                            b,Beta,0.5,0.5\n\
                            c,Gamma,0.0,0.0\n";

// ---------------------------------------------------------------------------
// score
// ---------------------------------------------------------------------------

#[test]
fn score_writes_default_output_next_to_nodes() {
    let dir = TempDir::new().unwrap();
    write_chain(dir.path());

    pb_cmd(dir.path())
        .args(["score", "--nodes", "sites.csv", "--edges", "links.csv"])
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote sites_with_power_broker_scores.csv"));

    let written =
        fs::read_to_string(dir.path().join("sites_with_power_broker_scores.csv")).unwrap();
    assert_eq!(written, CHAIN_SCORES);
}

#[test]
fn score_sequential_matches_parallel() {
    let dir = TempDir::new().unwrap();
    write_chain(dir.path());

    pb_cmd(dir.path())
        .args(["score", "--nodes", "sites.csv", "--edges", "links.csv"])
        .args(["--out", "seq.csv", "--sequential"])
        .assert()
        .success();
    pb_cmd(dir.path())
        .args(["score", "--nodes", "sites.csv", "--edges", "links.csv"])
        .args(["--out", "par.csv", "--threads", "2"])
        .assert()
        .success();

    let seq = fs::read_to_string(dir.path().join("seq.csv")).unwrap();
    let par = fs::read_to_string(dir.path().join("par.csv")).unwrap();
    assert_eq!(seq, CHAIN_SCORES);
    assert_eq!(seq, par);
}

#[test]
fn score_in_mode_reverses_direction() {
    let dir = TempDir::new().unwrap();
    write_chain(dir.path());

    pb_cmd(dir.path())
        .args(["score", "--nodes", "sites.csv", "--edges", "links.csv"])
        .args(["--mode", "in", "--out", "in.csv"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("in.csv")).unwrap();
    assert_eq!(
        written,
        "id,name,closeness_all_edges,closeness_no_road_edges\n\
         a,Alpha,0.0,0.0\n\
         b,Beta,0.5,0.0\n\
         c,Gamma,0.6666666666666666,0.5\n"
    );
}

#[test]
fn score_json_summary() {
    let dir = TempDir::new().unwrap();
    write_chain(dir.path());

    let output = pb_cmd(dir.path())
        .args(["score", "--nodes", "sites.csv", "--edges", "links.csv"])
        .args(["--out", "scored.csv", "--json"])
        .output()
        .expect("score should not crash");
    assert!(
        output.status.success(),
        "score failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["output"], "scored.csv");
    assert_eq!(json["rows"], 3);
    assert_eq!(json["mode"], "out");
    let views = json["views"].as_array().expect("views array");
    assert_eq!(views.len(), 2);
    assert_eq!(views[0]["stats"]["label"], "closeness_all_edges");
    assert_eq!(views[0]["stats"]["edge_count"], 2);
    assert_eq!(views[1]["stats"]["label"], "closeness_no_road_edges");
    assert_eq!(views[1]["stats"]["excluded_edge_count"], 1);
    assert_eq!(views[1]["scores"]["zero_count"], 2);
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_endpoint_fails_with_code() {
    let dir = TempDir::new().unwrap();
    write_chain(dir.path());
    fs::write(
        dir.path().join("links.csv"),
        "source,target,type\na,b,road\nb,zeta,trade\n",
    )
    .unwrap();

    let output = pb_cmd(dir.path())
        .args(["score", "--nodes", "sites.csv", "--edges", "links.csv", "--json"])
        .output()
        .expect("score should not crash");
    assert!(!output.status.success());

    let json: Value = serde_json::from_slice(&output.stderr).expect("stderr should be JSON");
    assert_eq!(json["error"]["error_code"], "E2001");
    let message = json["error"]["message"].as_str().expect("message");
    assert!(message.contains("zeta"), "message: {message}");
    assert!(!dir.path().join("sites_with_power_broker_scores.csv").exists());
}

#[test]
fn missing_id_column_fails_with_code() {
    let dir = TempDir::new().unwrap();
    write_chain(dir.path());
    fs::write(dir.path().join("sites.csv"), "key,name\na,Alpha\n").unwrap();

    pb_cmd(dir.path())
        .args(["score", "--nodes", "sites.csv", "--edges", "links.csv"])
        .args(["--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1002]"));
}

#[test]
fn missing_input_file_is_reported() {
    let dir = TempDir::new().unwrap();

    pb_cmd(dir.path())
        .args(["score", "--nodes", "absent.csv", "--edges", "links.csv"])
        .args(["--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.csv"));
}

// ---------------------------------------------------------------------------
// stats
// ---------------------------------------------------------------------------

#[test]
fn stats_json_reports_both_views() {
    let dir = TempDir::new().unwrap();
    write_chain(dir.path());

    let output = pb_cmd(dir.path())
        .args(["stats", "--nodes", "sites.csv", "--edges", "links.csv", "--json"])
        .output()
        .expect("stats should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["nodes"], 3);
    assert_eq!(json["edges"], 2);
    let views = json["views"].as_array().expect("views array");
    assert_eq!(views.len(), 2);
    assert_eq!(views[0]["stats"]["weakly_connected_component_count"], 1);
    assert_eq!(views[1]["stats"]["weakly_connected_component_count"], 2);
    assert!(
        views[0]["stats"]["fingerprint"]
            .as_str()
            .expect("fingerprint")
            .starts_with("blake3:")
    );
    assert!(!dir.path().join("sites_with_power_broker_scores.csv").exists());
}

#[test]
fn stats_text_has_one_line_per_view() {
    let dir = TempDir::new().unwrap();
    write_chain(dir.path());

    let output = pb_cmd(dir.path())
        .args(["stats", "--nodes", "sites.csv", "--edges", "links.csv"])
        .args(["--format", "text", "--exclude-category", "trade"])
        .output()
        .expect("stats should not crash");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("closeness_no_trade_edges\t1\t1\t"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_file_in_working_directory_is_applied() {
    let dir = TempDir::new().unwrap();
    write_chain(dir.path());
    fs::write(
        dir.path().join("power-broker.toml"),
        "exclude_category = \"trade\"\n\n[labels]\nall_edges = \"reach\"\n",
    )
    .unwrap();

    pb_cmd(dir.path())
        .args(["score", "--nodes", "sites.csv", "--edges", "links.csv"])
        .args(["--out", "scored.csv"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("scored.csv")).unwrap();
    assert_eq!(
        written,
        "id,name,reach,closeness_no_trade_edges\n\
         a,Alpha,0.6666666666666666,0.5\n\
         b,Beta,0.5,0.0\n\
         c,Gamma,0.0,0.0\n"
    );
}

#[test]
fn malformed_config_fails_with_code() {
    let dir = TempDir::new().unwrap();
    write_chain(dir.path());
    fs::write(dir.path().join("custom.toml"), "mode = \"sideways\"\n").unwrap();

    pb_cmd(dir.path())
        .args(["score", "--config", "custom.toml"])
        .args(["--nodes", "sites.csv", "--edges", "links.csv", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1001]"));
}

// ---------------------------------------------------------------------------
// completions
// ---------------------------------------------------------------------------

#[test]
fn completions_bash_mentions_binary() {
    let dir = TempDir::new().unwrap();

    pb_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("power-broker"));
}
