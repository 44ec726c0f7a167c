use std::process::Command;

#[test]
fn init_creates_valid_toml() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_truckstat"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "truckstat init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let config_path = dir.path().join(".truckstat.toml");
    assert!(config_path.exists(), ".truckstat.toml should exist");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[analysis]"));
    assert!(content.contains("[report]"));

    // Every key is commented out, so parsing yields the defaults
    let config = truckstat_core::TruckConfig::from_toml(&content).unwrap();
    assert_eq!(config.report.top_files, 5);
    assert_eq!(config.analysis.recent_threshold, 1_700_000_000);
}

#[test]
fn init_refuses_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".truckstat.toml"), "# existing").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_truckstat"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let content = std::fs::read_to_string(dir.path().join(".truckstat.toml")).unwrap();
    assert_eq!(content, "# existing");
}
