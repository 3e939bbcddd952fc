#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn checklist(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("checklist").unwrap();
    cmd.current_dir(dir.path())
        .env("CHECKLIST_ROOT", dir.path())
        .env_remove("CHECKLIST_SERVER_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn show_json(dir: &TempDir) -> serde_json::Value {
    let out = checklist(dir).args(["show", "--json"]).output().unwrap();
    assert!(out.status.success());
    serde_json::from_slice(&out.stdout).unwrap()
}

fn completed_ids(show: &serde_json::Value) -> Vec<String> {
    show["categories"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|c| c["items"].as_array().unwrap().iter())
        .filter(|i| i["completed"] == true)
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect()
}

fn cache_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join(".checklist/cx-checklist.json")
}

// ---------------------------------------------------------------------------
// checklist show
// ---------------------------------------------------------------------------

#[test]
fn first_show_renders_seed_and_writes_cache() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Foundational Customer Experience Check-List",
        ))
        .stdout(predicate::str::contains("Overall progress: 0/25 (0%)"))
        .stdout(predicate::str::contains("onboarding-1"));

    assert!(cache_file(&dir).exists());
}

#[test]
fn show_json_reports_default_source() {
    let dir = TempDir::new().unwrap();
    let json = show_json(&dir);
    assert_eq!(json["source"], "default");
    assert_eq!(json["categories"].as_array().unwrap().len(), 5);
    assert_eq!(json["progress"]["total"], 25);

    // Second run reads the cache written by the first.
    assert_eq!(show_json(&dir)["source"], "local");
}

#[test]
fn show_single_category() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["show", "--category", "voc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("voc-1"))
        .stdout(predicate::str::contains("onboarding-1").not());
}

#[test]
fn show_unknown_category_fails() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["show", "--category", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no category with id 'nope'"));
}

#[test]
fn malformed_cache_falls_back_to_seed() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".checklist")).unwrap();
    std::fs::write(cache_file(&dir), "{\"title\": \"CX\", \"categ").unwrap();

    let json = show_json(&dir);
    assert_eq!(json["source"], "default");
    assert!(completed_ids(&json).is_empty());
}

// ---------------------------------------------------------------------------
// checklist toggle / uncheck
// ---------------------------------------------------------------------------

#[test]
fn toggle_persists_across_runs() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["toggle", "csm-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x]"));

    assert_eq!(completed_ids(&show_json(&dir)), vec!["csm-2"]);

    checklist(&dir)
        .args(["toggle", "csm-2", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"completed\": false"));
    assert!(completed_ids(&show_json(&dir)).is_empty());
}

#[test]
fn toggle_unknown_item_fails() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["toggle", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no item with id 'does-not-exist'"));
}

#[test]
fn uncheck_clears_only_that_category() {
    let dir = TempDir::new().unwrap();
    for id in ["support-1", "support-2", "voc-3"] {
        checklist(&dir).args(["toggle", id]).assert().success();
    }

    checklist(&dir)
        .args(["uncheck", "support"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unchecked every item"));

    assert_eq!(completed_ids(&show_json(&dir)), vec!["voc-3"]);
}

#[test]
fn uncheck_unknown_category_fails() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["uncheck", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no category with id 'nope'"));
}

// ---------------------------------------------------------------------------
// checklist save / status / reload
// ---------------------------------------------------------------------------

#[test]
fn save_without_identity_is_local_only() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .arg("save")
        .assert()
        .success()
        .stdout(predicate::str::contains("saved on this device"));

    checklist(&dir)
        .args(["save", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local_only"));
}

#[test]
fn status_offline_shows_progress() {
    let dir = TempDir::new().unwrap();
    checklist(&dir).args(["toggle", "analytics-1"]).assert().success();
    checklist(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"))
        .stdout(predicate::str::contains("Sync: Offline mode"))
        .stdout(predicate::str::contains("Progress: 1/25 (4%)"));
}

#[test]
fn reload_reports_source() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .arg("reload")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded from a fresh checklist"));
    checklist(&dir)
        .arg("reload")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded from this device"));
}

// ---------------------------------------------------------------------------
// checklist export
// ---------------------------------------------------------------------------

#[test]
fn export_summary_to_stdout() {
    let dir = TempDir::new().unwrap();
    checklist(&dir).args(["toggle", "onboarding-2"]).assert().success();
    checklist(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated on: "))
        .stdout(predicate::str::contains("| Status | Task | Priority |"))
        .stdout(predicate::str::contains("| ✓ |"));
}

#[test]
fn export_detailed_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reports/detailed.md");
    checklist(&dir)
        .args(["export", "--detailed", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote detailed report"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("Detailed Report - Generated on: "));
    assert!(text.contains("**Expert Insight:**"));
}

#[test]
fn export_out_without_path_uses_default_names() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["export", "--out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cx-checklist.md"));
    checklist(&dir)
        .args(["export", "--detailed", "--out"])
        .assert()
        .success();

    let summary = std::fs::read_to_string(dir.path().join("cx-checklist.md")).unwrap();
    assert!(summary.contains("| Status | Task | Priority |"));
    let detailed =
        std::fs::read_to_string(dir.path().join("cx-checklist-detailed-report.md")).unwrap();
    assert!(detailed.contains("Detailed Report - Generated on: "));
}

// ---------------------------------------------------------------------------
// checklist config / login / logout
// ---------------------------------------------------------------------------

#[test]
fn login_requires_remote() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["login", "jane"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("remote not configured"));
}

#[test]
fn login_rejects_invalid_identity() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["login", "not valid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid identity"));
}

#[test]
fn set_remote_and_clear_remote() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["config", "set-remote", "http://localhost:3141/", "--token", "t0k"])
        .assert()
        .success();

    let out = checklist(&dir)
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["remote"]["url"], "http://localhost:3141");
    assert_eq!(json["remote"]["token_set"], true);

    checklist(&dir).args(["config", "clear-remote"]).assert().success();
    checklist(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remote.url:        (none)"));
}

#[test]
fn set_remote_rejects_non_http_url() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["config", "set-remote", "ftp://example.test"])
        .assert()
        .failure();
}

#[test]
fn validate_flags_bad_identity() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".checklist")).unwrap();
    std::fs::write(
        dir.path().join(".checklist/config.yaml"),
        "identity: \"bad id\"\n",
    )
    .unwrap();
    checklist(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error]"));
}

#[test]
fn validate_clean_config() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn login_with_unreachable_remote_keeps_local_progress() {
    let dir = TempDir::new().unwrap();
    checklist(&dir).args(["toggle", "voc-4"]).assert().success();
    checklist(&dir)
        .args(["config", "set-remote", "http://127.0.0.1:9"])
        .assert()
        .success();

    checklist(&dir)
        .args(["login", "jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as jane."))
        .stderr(predicate::str::contains("Failed to load your checklist data."));

    assert_eq!(completed_ids(&show_json(&dir)), vec!["voc-4"]);

    checklist(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out of jane"));
    checklist(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn logout_when_signed_out_is_noop() {
    let dir = TempDir::new().unwrap();
    checklist(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
}
