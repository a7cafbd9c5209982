/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn write_advisory(dir: &Path, id: &str, module: &str, modified: &str, fixed: Option<&str>) {
    let mut events = vec![serde_json::json!({"introduced": "0"})];
    if let Some(fixed) = fixed {
        events.push(serde_json::json!({"fixed": fixed}));
    }
    let advisory = serde_json::json!({
        "schema_version": "1.3.1",
        "id": id,
        "modified": modified,
        "summary": format!("Test advisory {}", id),
        "affected": [{
            "package": {"ecosystem": "Go", "name": module},
            "ranges": [{"type": "SEMVER", "events": events}]
        }]
    });
    fs::write(
        dir.join(format!("{}.json", id)),
        serde_json::to_string_pretty(&advisory).unwrap(),
    )
    .unwrap();
}

fn write_advisories(dir: &Path) {
    write_advisory(dir, "GO-1999-0001", "stdlib", "2000-01-01T00:00:00Z", Some("1.2.2"));
    write_advisory(
        dir,
        "GO-2000-0002",
        "example.com/module",
        "2002-01-01T00:00:00Z",
        Some("1.2.0"),
    );
    write_advisory(
        dir,
        "GO-2000-0003",
        "example.com/module",
        "2003-01-01T00:00:00Z",
        Some("1.1.0"),
    );
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// A scan report for `source_path` with one vulnerable package.
fn write_report(dir: &Path, source_path: &str) -> std::path::PathBuf {
    let report = serde_json::json!({
        "source": {"path": source_path, "type": "lockfile"},
        "packages": [{
            "package": {"name": "example.com/module", "version": "1.0.0", "ecosystem": "Go"},
            "vulnerabilities": [{
                "id": "GO-2000-0002",
                "modified": "2002-01-01T00:00:00Z",
                "affected": [{"package": {"ecosystem": "Go", "name": "example.com/module"}}]
            }],
            "groups": [{"ids": ["GO-2000-0002"]}]
        }]
    });
    let path = dir.join("report.json");
    fs::write(&path, serde_json::to_string(&report).unwrap()).unwrap();
    path
}

// ============================================================================
// Exit codes
// ============================================================================

mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("osv-reachability").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("osv-reachability")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("osv-reachability")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Missing subcommand
    #[test]
    fn test_exit_code_missing_subcommand() {
        cargo_bin_cmd!("osv-reachability").assert().code(2);
    }

    /// Exit code 2: Invalid invocation value
    #[test]
    fn test_exit_code_invalid_invocation() {
        cargo_bin_cmd!("osv-reachability")
            .args(["analyze", "--report", "report.json", "--invocation", "telepathy"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - advisories directory does not exist
    #[test]
    fn test_exit_code_missing_advisories() {
        let temp_dir = TempDir::new().unwrap();
        cargo_bin_cmd!("osv-reachability")
            .args(["build-db", "--advisories"])
            .arg(temp_dir.path().join("missing"))
            .arg("--output")
            .arg(temp_dir.path().join("vulndb"))
            .assert()
            .code(3)
            .stderr(predicate::str::contains("An error occurred"));
    }

    /// Exit code 3: Application error - report does not exist
    #[test]
    fn test_exit_code_missing_report() {
        let temp_dir = TempDir::new().unwrap();
        cargo_bin_cmd!("osv-reachability")
            .current_dir(temp_dir.path())
            .args(["analyze", "--report", "missing.json"])
            .assert()
            .code(3);
    }
}

// ============================================================================
// build-db
// ============================================================================

#[test]
fn test_build_db_writes_layout() {
    let temp_dir = TempDir::new().unwrap();
    let advisories = temp_dir.path().join("advisories");
    fs::create_dir(&advisories).unwrap();
    write_advisories(&advisories);
    let output = temp_dir.path().join("vulndb");

    cargo_bin_cmd!("osv-reachability")
        .args(["build-db", "--advisories"])
        .arg(&advisories)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 3 advisory entries for 2 module(s)"));

    let db = read_json(&output.join("index/db.json"));
    assert_eq!(db, serde_json::json!({"modified": "2003-01-01T00:00:00Z"}));

    let modules = read_json(&output.join("index/modules.json"));
    assert_eq!(
        modules,
        serde_json::json!([
            {
                "path": "example.com/module",
                "vulns": [
                    {"id": "GO-2000-0002", "modified": "2002-01-01T00:00:00Z", "fixed": "1.2.0"},
                    {"id": "GO-2000-0003", "modified": "2003-01-01T00:00:00Z", "fixed": "1.1.0"}
                ]
            },
            {
                "path": "stdlib",
                "vulns": [
                    {"id": "GO-1999-0001", "modified": "2000-01-01T00:00:00Z", "fixed": "1.2.2"}
                ]
            }
        ])
    );

    let entry = read_json(&output.join("ID/GO-2000-0003.json"));
    assert_eq!(entry["summary"], "Test advisory GO-2000-0003");
    assert_eq!(entry["schema_version"], "1.3.1");
}

#[test]
fn test_build_db_duplicate_ids() {
    let temp_dir = TempDir::new().unwrap();
    let advisories = temp_dir.path().join("advisories");
    fs::create_dir(&advisories).unwrap();
    write_advisories(&advisories);
    // Same ID under a different file name
    fs::copy(
        advisories.join("GO-2000-0002.json"),
        advisories.join("GO-2000-0002-copy.json"),
    )
    .unwrap();

    cargo_bin_cmd!("osv-reachability")
        .args(["build-db", "--advisories"])
        .arg(&advisories)
        .arg("--output")
        .arg(temp_dir.path().join("vulndb"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Duplicate advisory entry: GO-2000-0002"));

    assert!(!temp_dir.path().join("vulndb").exists());
}

#[test]
fn test_build_db_malformed_advisory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("GO-2000-0002.json"), "{ broken").unwrap();

    cargo_bin_cmd!("osv-reachability")
        .args(["build-db", "--advisories"])
        .arg(temp_dir.path())
        .arg("--output")
        .arg(temp_dir.path().join("vulndb"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("GO-2000-0002.json"));
}

// ============================================================================
// analyze
// ============================================================================

#[test]
fn test_analyze_non_go_source_passes_through() {
    let temp_dir = TempDir::new().unwrap();
    let report = write_report(temp_dir.path(), "package-lock.json");

    let assert = cargo_bin_cmd!("osv-reachability")
        .current_dir(temp_dir.path())
        .arg("analyze")
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let stdout: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(stdout, read_json(&report));
}

#[test]
fn test_analyze_missing_tool_degrades() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("go.mod"), "module example.com/app\n").unwrap();
    let report = write_report(temp_dir.path(), "go.mod");

    let assert = cargo_bin_cmd!("osv-reachability")
        .current_dir(temp_dir.path())
        .args(["analyze", "--report"])
        .arg(&report)
        .args(["--go", "/nonexistent/bin/go", "--invocation", "legacy"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to run code analysis"));

    // Unannotated report
    let stdout: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(stdout, read_json(&report));
    assert!(stdout["packages"][0]["groups"][0]
        .get("experimental_analysis")
        .is_none());
}

#[test]
fn test_analyze_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let report = write_report(temp_dir.path(), "requirements.txt");
    let output = temp_dir.path().join("annotated.json");

    cargo_bin_cmd!("osv-reachability")
        .current_dir(temp_dir.path())
        .args(["analyze", "--report"])
        .arg(&report)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(read_json(&output), read_json(&report));
}

#[test]
fn test_analyze_malformed_report() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("report.json");
    fs::write(&report, "not json").unwrap();

    cargo_bin_cmd!("osv-reachability")
        .current_dir(temp_dir.path())
        .args(["analyze", "--report"])
        .arg(&report)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to encode or decode JSON"));
}
