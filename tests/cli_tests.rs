//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const WRAPPER: &str = include_str!("fixtures/user_project_wrapper.json");

/// Lay out a caravel-style tree with the wrapper descriptor under
/// `openlane/user_project_wrapper/`, returning the descriptor path.
fn write_design(root: &Path, with_sources: bool) -> PathBuf {
    let design_dir = root.join("openlane").join("user_project_wrapper");
    fs::create_dir_all(&design_dir).expect("design dir");
    let config = design_dir.join("config.json");
    fs::write(&config, WRAPPER).expect("write config");

    if with_sources {
        fs::create_dir_all(root.join("caravel")).expect("caravel dir");
        fs::create_dir_all(root.join("rtl")).expect("rtl dir");
        fs::write(root.join("caravel").join("user_project_wrapper.v"), "module w; endmodule\n")
            .expect("write wrapper");
        fs::write(root.join("rtl").join("s247_pathfinder_top.sv"), "module t; endmodule\n")
            .expect("write top");
        fs::write(root.join("rtl").join("s247_compute_core.sv"), "module c; endmodule\n")
            .expect("write core");
        fs::write(design_dir.join("pin_order.cfg"), "#S\nwb_clk_i\n").expect("write pins");
    }
    config
}

fn flow_config() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("flow-config"))
}

#[test]
fn test_cli_version() {
    let mut cmd = flow_config();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("flow-config"));
}

#[test]
fn test_cli_help() {
    let mut cmd = flow_config();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Validate and resolve design descriptors"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("catalog"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_check_accepts_valid_descriptor() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_design(tmp.path(), false);

    let mut cmd = flow_config();
    cmd.arg("check").arg(&config);
    cmd.assert().success().stdout(predicate::str::contains("ok user_project_wrapper"));
}

#[test]
fn test_check_accepts_design_directory() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_design(tmp.path(), false);

    let mut cmd = flow_config();
    cmd.arg("check").arg(config.parent().expect("design dir"));
    cmd.assert().success().stdout(predicate::str::contains("ok user_project_wrapper"));
}

#[test]
fn test_check_reports_all_errors() {
    let tmp = TempDir::new().expect("tmp");
    let config = tmp.path().join("config.json");
    fs::write(
        &config,
        r#"{"DESIGN_NAME": "spm", "PL_TARGET_DENSITY": 1.5, "CELL_PAD": -2, "MYSTERY": 1}"#,
    )
    .expect("write");

    let mut cmd = flow_config();
    cmd.arg("check").arg(&config);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("invalid"))
        .stdout(predicate::str::contains("VERILOG_FILES: required field is missing"))
        .stdout(predicate::str::contains("PL_TARGET_DENSITY: value 1.5 violates bound (0, 1]"))
        .stdout(predicate::str::contains("CELL_PAD: value -2 violates bound >= 0"))
        .stdout(predicate::str::contains("MYSTERY: expected a recognized configuration key"))
        .stderr(predicate::str::contains("1 of 1 configurations failed validation"));
}

#[test]
fn test_check_permissive_flag_keeps_unknown_keys() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_design(tmp.path(), false);
    let mut doc: serde_json::Value = serde_json::from_str(WRAPPER).expect("fixture");
    doc["EXTRA_LEFS"] = serde_json::json!("dir::macros/*.lef");
    fs::write(&config, doc.to_string()).expect("rewrite");

    let mut cmd = flow_config();
    cmd.arg("check").arg(&config);
    cmd.assert().failure().stdout(predicate::str::contains("EXTRA_LEFS"));

    let mut cmd = flow_config();
    cmd.args(["check", "--permissive"]).arg(&config);
    cmd.assert().success();
}

#[test]
fn test_check_permissive_from_environment() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_design(tmp.path(), false);
    let mut doc: serde_json::Value = serde_json::from_str(WRAPPER).expect("fixture");
    doc["EXTRA_LEFS"] = serde_json::json!("dir::macros/*.lef");
    fs::write(&config, doc.to_string()).expect("rewrite");

    let mut cmd = flow_config();
    cmd.env("FLOW_CONFIG_UNKNOWN_KEYS", "permissive").arg("check").arg(&config);
    cmd.assert().success();
}

#[test]
fn test_check_verify_files() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_design(tmp.path(), false);

    let mut cmd = flow_config();
    cmd.args(["check", "--verify-files"]).arg(&config);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("missing files"))
        .stdout(predicate::str::contains("s247_compute_core.sv"));

    write_design(tmp.path(), true);
    let mut cmd = flow_config();
    cmd.args(["check", "--verify-files"]).arg(&config);
    cmd.assert().success();
}

#[test]
fn test_check_multiple_descriptors_json() {
    let tmp = TempDir::new().expect("tmp");
    let good = write_design(tmp.path(), false);
    let bad = tmp.path().join("bad.json");
    fs::write(&bad, "[]").expect("write");

    let output = flow_config()
        .args(["check", "--json"])
        .arg(&good)
        .arg(&bad)
        .output()
        .expect("run");
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<serde_json::Value> =
        stdout.lines().map(|l| serde_json::from_str(l).expect("json line")).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["status"], "ok");
    assert_eq!(lines[0]["design"], "user_project_wrapper");
    assert_eq!(lines[1]["status"], "invalid");
    assert_eq!(lines[1]["errors"][0]["kind"], "schema");
}

#[test]
fn test_check_missing_file() {
    let mut cmd = flow_config();
    cmd.args(["check", "does/not/exist.json"]);
    cmd.assert().failure().stdout(predicate::str::contains("Config file not found"));
}

#[test]
fn test_resolve_prints_resolved_paths() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_design(tmp.path(), false);
    let root = tmp.path().canonicalize().expect("canonical root");

    let output = flow_config().arg("resolve").arg(&config).output().expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["fingerprint"].as_str().map(str::len), Some(64));
    assert_eq!(value["config"]["design_name"], "user_project_wrapper");
    let expected = root.join("rtl").join("s247_compute_core.sv");
    assert_eq!(value["config"]["source_files"][2], expected.display().to_string());
}

#[test]
fn test_catalog_lists_builtin_processes() {
    let mut cmd = flow_config();
    cmd.arg("catalog");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gf180mcuD"))
        .stdout(predicate::str::contains("gf180mcu_fd_sc_mcu7t5v0"))
        .stdout(predicate::str::contains("Metal1 < Metal2"));
}

#[test]
fn test_catalog_from_file() {
    let mut cmd = flow_config();
    cmd.args(["catalog", "--catalog", "tests/fixtures/toy_catalog.yaml"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("toy1"))
        .stdout(predicate::str::contains("m1 < m2 < m3"))
        .stdout(predicate::str::contains("gf180mcuD").not());
}

#[test]
fn test_completions() {
    let mut cmd = flow_config();
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("flow-config"));
}
