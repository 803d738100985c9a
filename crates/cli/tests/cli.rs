use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_sample(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("taxonomy.json");

    let mut cmd = cargo_bin_cmd!("tagtree");
    cmd.current_dir(dir.path())
        .args(["new", "--sample", "--path"])
        .arg(&path)
        .assert()
        .success();

    path
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("tagtree.toml");

    let mut cmd = cargo_bin_cmd!("tagtree");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("taxonomy_path"));
    assert!(content.contains("enforce_leaf_rule = false"));
}

#[test]
fn export_renders_worked_example() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_sample(&dir);

    let mut cmd = cargo_bin_cmd!("tagtree");
    cmd.current_dir(dir.path())
        .args(["export", "--file"])
        .arg(&path)
        .args(["--select", "jk", "black-stockings", "sailor-uniform", "skirt", "loafers"])
        .assert()
        .success()
        .stdout("学生, JK, 水手服, 短裙, 乐福鞋, 丝袜, 黑丝\n");
}

#[test]
fn export_json_lists_ordered_ids() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_sample(&dir);

    let mut cmd = cargo_bin_cmd!("tagtree");
    let output = cmd
        .current_dir(dir.path())
        .args(["export", "--json", "--no-ancestors", "--file"])
        .arg(&path)
        .args(["--select", "black-stockings", "stockings"])
        .output()
        .expect("run export");

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["keywords"], "丝袜, 黑丝");
    assert_eq!(value["ids"][0], "stockings");
}

#[test]
fn export_fails_on_unknown_id() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_sample(&dir);

    let mut cmd = cargo_bin_cmd!("tagtree");
    cmd.current_dir(dir.path())
        .args(["export", "--file"])
        .arg(&path)
        .args(["--select", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown node id(s): ghost"));
}

#[test]
fn validate_enforces_leaf_rule_from_env() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_sample(&dir);

    let mut cmd = cargo_bin_cmd!("tagtree");
    cmd.current_dir(dir.path())
        .env("TAGTREE__VALIDATION__ENFORCE_LEAF_RULE", "true")
        .args(["validate", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TAG_HAS_CHILDREN"));
}

#[test]
fn validate_json_reports_every_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{"schemaVersion": "1.0.0", "nodes": [
            {"id": "a", "label": "one, two", "parentId": null, "kind": "tag"},
            {"id": "b", "label": "B", "parentId": "missing", "kind": "tag"}
        ]}"#,
    )
    .expect("write taxonomy");

    let mut cmd = cargo_bin_cmd!("tagtree");
    let output = cmd
        .current_dir(dir.path())
        .args(["validate", "--json", "--file"])
        .arg(&path)
        .output()
        .expect("run validate");

    assert!(!output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["valid"], false);
    assert_eq!(value["errors"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["errors"][0]["code"], "LABEL_CONTAINS_COMMA");
    assert_eq!(value["errors"][1]["code"], "ORPHAN_PARENT");
}

#[test]
fn add_then_tree_shows_node() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_sample(&dir);

    let mut add = cargo_bin_cmd!("tagtree");
    add.current_dir(dir.path())
        .args(["add", "--label", "靴子", "--kind", "tag", "--parent", "shoes", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("node-"));

    let mut tree = cargo_bin_cmd!("tagtree");
    tree.current_dir(dir.path())
        .args(["tree", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  靴子 [tag]"));
}

#[test]
fn add_rejects_comma_label() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_sample(&dir);

    let mut cmd = cargo_bin_cmd!("tagtree");
    cmd.current_dir(dir.path())
        .args(["add", "--label", "a,b", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Node rejected"));
}

#[test]
fn normalize_rewrites_orders() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("gaps.json");
    fs::write(
        &path,
        r#"{"schemaVersion": "1.0.0", "nodes": [
            {"id": "x", "label": "X", "parentId": null, "kind": "tag", "order": 40},
            {"id": "y", "label": "Y", "parentId": null, "kind": "tag", "order": -2}
        ]}"#,
    )
    .expect("write taxonomy");
    let output_path = dir.path().join("normalized.json");

    let mut cmd = cargo_bin_cmd!("tagtree");
    cmd.current_dir(dir.path())
        .args(["normalize", "--file"])
        .arg(&path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    let value: Value =
        serde_json::from_str(&fs::read_to_string(&output_path).expect("read output"))
            .expect("valid json");
    assert_eq!(value["nodes"][0]["order"], 1);
    assert_eq!(value["nodes"][1]["order"], 0);
    assert!(value["meta"]["updatedAt"].is_string());
}

#[test]
fn search_prints_breadcrumbs() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_sample(&dir);

    let mut cmd = cargo_bin_cmd!("tagtree");
    cmd.current_dir(dir.path())
        .args(["search", "短", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("skirt\t衣服 / 下半身 / 短裙"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_sample(&dir);

    let mut cmd = cargo_bin_cmd!("tagtree");
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("typo.toml"))
        .args(["validate", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn broken_config_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("tagtree.toml"), "[export\nseparator = ").expect("write config");

    let mut cmd = cargo_bin_cmd!("tagtree");
    cmd.current_dir(dir.path())
        .args(["new", "--path"])
        .arg(dir.path().join("fresh.json"))
        .assert()
        .failure();
    assert!(!dir.path().join("fresh.json").exists());
}
