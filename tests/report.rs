use std::path::Path;
use std::process::{Command, Output};

const DOCUMENT: &str = r#"{
  "simplifiedTree": {
    "type": "tree",
    "name": "demo",
    "children": [
      {
        "type": "blob",
        "name": "x.ts",
        "sizeInBytes": 100,
        "noCommits": 3,
        "authors": { "alice": 100 },
        "unionedAuthors": { "HISTORICAL": { "alice": 50 } }
      },
      {
        "type": "blob",
        "name": "y.ts",
        "sizeInBytes": 200,
        "noCommits": 5,
        "authors": { "alice": 40, "bob": 60 },
        "unionedAuthors": { "HISTORICAL": { "alice": 10, "bob": 30 } }
      }
    ]
  }
}"#;

fn truckstat(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_truckstat"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn report_writes_default_summary_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("contributions.json"), DOCUMENT).unwrap();

    let output = truckstat(dir.path(), &["report", "contributions.json"]);
    assert!(
        output.status.success(),
        "report failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let summary = std::fs::read_to_string(dir.path().join("contributions_summary.md")).unwrap();
    assert!(summary.starts_with("# Contribution Analysis: DEMO"));
    assert!(summary.contains("- **Files**: 2"));
    assert!(summary.contains("- **alice & bob**: 1 shared files"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("contributions_summary.md"));
    assert!(output.stdout.is_empty());
}

#[test]
fn print_writes_the_same_document_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.json"), DOCUMENT).unwrap();

    let output = truckstat(dir.path(), &["report", "in.json", "-o", "out.md", "--print"]);
    assert!(output.status.success());

    let written = std::fs::read_to_string(dir.path().join("out.md")).unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), written);
    assert!(!dir.path().join("in_summary.md").exists());
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.json"), DOCUMENT).unwrap();

    assert!(truckstat(dir.path(), &["report", "in.json", "-o", "a.md", "--structure"])
        .status
        .success());
    assert!(truckstat(dir.path(), &["report", "in.json", "-o", "b.md", "--structure"])
        .status
        .success());

    let a = std::fs::read(dir.path().join("a.md")).unwrap();
    let b = std::fs::read(dir.path().join("b.md")).unwrap();
    assert_eq!(a, b);
    assert!(String::from_utf8_lossy(&a).contains("## Project Structure"));
}

#[test]
fn json_format_writes_summary_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.json"), DOCUMENT).unwrap();

    let output = truckstat(dir.path(), &["--format", "json", "report", "in.json"]);
    assert!(output.status.success());

    let content = std::fs::read_to_string(dir.path().join("in_summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["stats"]["totalSizeBytes"], 300);
    assert_eq!(value["collaboration"]["pairs"][0]["sharedCount"], 1);
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();

    let output = truckstat(dir.path(), &["report", "absent.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("file not found"));
    assert!(!dir.path().join("absent_summary.md").exists());
}

#[test]
fn malformed_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), "{\"simplifiedTree\": ").unwrap();

    let output = truckstat(dir.path(), &["report", "broken.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed document"));
    assert!(!dir.path().join("broken_summary.md").exists());
}

#[test]
fn document_without_tree_reports_zeroes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("empty.json"), "{}").unwrap();

    let output = truckstat(dir.path(), &["report", "empty.json"]);
    assert!(output.status.success());

    let summary = std::fs::read_to_string(dir.path().join("empty_summary.md")).unwrap();
    assert!(summary.starts_with("# Contribution Analysis: PROJECT"));
    assert!(summary.contains("- **Files**: 0"));
}

#[test]
fn local_config_limits_the_report() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.json"), DOCUMENT).unwrap();
    std::fs::write(dir.path().join(".truckstat.toml"), "[report]\ntop_files = 1\n").unwrap();

    assert!(truckstat(dir.path(), &["report", "in.json"]).status.success());
    let summary = std::fs::read_to_string(dir.path().join("in_summary.md")).unwrap();
    assert!(summary.contains("1. **y.ts** - 200.0 B"));
    assert!(!summary.contains("2. **x.ts** - 100.0 B"));
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.json"), DOCUMENT).unwrap();
    std::fs::write(dir.path().join("bad.toml"), "[report]\ntop_files = 0\n").unwrap();

    let output = truckstat(dir.path(), &["--config", "bad.toml", "report", "in.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("in_summary.md").exists());
}
