//! End-to-end tests for the `nameinfo` binary.

mod common;

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn run_nameinfo(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_nameinfo");
    let output = Command::new(binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run nameinfo binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_nameinfo_async(config_path: PathBuf, args: Vec<&'static str>) -> (String, String, bool) {
    tokio::task::spawn_blocking(move || run_nameinfo(&config_path, &args))
        .await
        .unwrap()
}

#[test]
fn test_init_creates_database() {
    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(tmp.path(), None);

    let (stdout, stderr, success) = run_nameinfo(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data/nameinfo.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(tmp.path(), None);

    let (_, _, first) = run_nameinfo(&config_path, &["init"]);
    let (_, stderr, second) = run_nameinfo(&config_path, &["init"]);
    assert!(first);
    assert!(second, "second init failed: {}", stderr);
}

#[test]
fn test_recent_empty() {
    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(tmp.path(), None);

    let (stdout, stderr, success) = run_nameinfo(&config_path, &["recent"]);
    assert!(success, "recent failed: {}", stderr);
    assert!(stdout.contains("No recent lookups."));
}

#[test]
fn test_show_unknown_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(tmp.path(), None);

    let (_, stderr, success) = run_nameinfo(&config_path, &["show", "nobody"]);
    assert!(!success);
    assert!(stderr.contains("'Nobody' is not in the cache"));
}

#[test]
fn test_lookup_empty_name_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(tmp.path(), None);

    let (_, stderr, success) = run_nameinfo(&config_path, &["lookup", "   "]);
    assert!(!success);
    assert!(stderr.contains("name must not be empty"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_rejects_bad_country_flag() {
    let services = common::spawn_mock(None).await;
    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(tmp.path(), Some(&services));

    let (_, stderr, success) =
        run_nameinfo_async(config_path, vec!["lookup", "jacob", "--country", "USA"]).await;
    assert!(!success);
    assert!(stderr.contains("two-letter ISO code"));
    assert_eq!(services.state.request_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_country_flag_is_uppercased() {
    let services = common::spawn_mock(None).await;
    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(tmp.path(), Some(&services));

    let (_, stderr, success) =
        run_nameinfo_async(config_path, vec!["lookup", "jacob", "--country", "de"]).await;
    assert!(success, "lookup failed: {}", stderr);
    let requests = services.state.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 3);
    assert!(requests
        .iter()
        .all(|(_, q)| q.get("country_id").map(String::as_str) == Some("DE")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_then_cached() {
    let services = common::spawn_mock(None).await;
    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(tmp.path(), Some(&services));

    let (stdout, stderr, success) =
        run_nameinfo_async(config_path.clone(), vec!["lookup", " jacob "]).await;
    assert!(success, "lookup failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("Jacob\n"));
    assert!(stdout.contains("Gender:  Male (80%)"));
    assert!(stdout.contains("United States"));
    assert_eq!(services.state.request_count(), 3);

    let (stdout, stderr, success) =
        run_nameinfo_async(config_path.clone(), vec!["lookup", "Jacob", "--json"]).await;
    assert!(success, "cached lookup failed: {}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["name"], "Jacob");
    assert_eq!(json["age"], 40);
    assert_eq!(json["nationality"][0]["country_id"], "US");
    assert_eq!(services.state.request_count(), 3);

    let (stdout, _, success) = run_nameinfo_async(config_path.clone(), vec!["recent"]).await;
    assert!(success);
    assert!(stdout.contains("Jacob"));
    assert!(stdout.contains("US 30%, IL 12%"));

    let (_, _, success) =
        run_nameinfo_async(config_path.clone(), vec!["lookup", "jacob", "--refresh"]).await;
    assert!(success);
    assert_eq!(services.state.request_count(), 6);

    let (stdout, _, success) = run_nameinfo_async(config_path.clone(), vec!["forget", "jacob"]).await;
    assert!(success);
    assert!(stdout.contains("Removed 'Jacob'."));

    let (stdout, _, _) = run_nameinfo_async(config_path, vec!["recent", "--json"]).await;
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_failure_leaves_cache_empty() {
    let services = common::spawn_mock(Some("age")).await;
    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(tmp.path(), Some(&services));

    let (_, stderr, success) =
        run_nameinfo_async(config_path.clone(), vec!["lookup", "jacob"]).await;
    assert!(!success);
    assert!(stderr.contains("age service returned HTTP 500"));

    let (stdout, _, success) = run_nameinfo_async(config_path, vec!["recent"]).await;
    assert!(success);
    assert!(stdout.contains("No recent lookups."));
}
