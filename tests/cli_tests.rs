use assert_cmd::Command;

fn pcbcoil() -> Command {
    Command::cargo_bin("pcbcoil").unwrap()
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_missing_subcommand() {
    let output = pcbcoil().output().unwrap();
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Usage: pcbcoil"));
    assert!(stderr.contains("sample"));
    assert!(stderr.contains("example"));
}

#[test]
fn test_example_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    for (format, file) in [("toml", "spec.toml"), ("yaml", "spec.yaml"), ("json", "spec.json")] {
        let output = pcbcoil().args(["example", "--format", format]).output().unwrap();
        assert!(output.status.success());
        let spec_path = dir.path().join(file);
        std::fs::write(&spec_path, stdout_of(&output)).unwrap();

        pcbcoil()
            .args(["sample", spec_path.to_str().unwrap(), "--seed", "3"])
            .assert()
            .success();
    }
}

#[test]
fn test_sample_stdout_is_deterministic() {
    let run = || {
        let output = pcbcoil()
            .args(["sample", "tests/data/basic_spec.toml", "--seed", "42"])
            .output()
            .unwrap();
        assert!(output.status.success(), "{}", stderr_of(&output));
        stdout_of(&output)
    };
    let first = run();
    assert_eq!(first, run());

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value["seed"], 42);
    assert_eq!(value["coil"]["instances"][1]["name"], "i1_neg_x");
    assert_eq!(value["coil"]["outer_faces"]["pos_x"], true);
}

#[test]
fn test_sample_to_file_with_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("design.json");
    pcbcoil()
        .args(["sample", "tests/data/basic_spec.toml", "--debug-geometry", "--output"])
        .arg(&out_path)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let geometry = value["debug_geometry"].as_array().unwrap();
    assert!(!geometry.is_empty());
    assert_eq!(geometry[0]["name"], "front");
    assert_eq!(geometry[0]["geometry"]["topology"]["component_count"], 1);
    assert_eq!(geometry[0]["geometry"]["topology"]["endpoint_count"], 2);
}

#[test]
fn test_exhaustion_reports_histogram() {
    let output = pcbcoil()
        .args(["sample", "tests/data/unreachable_gap.yaml"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("SAMPLING ERROR"));
    assert!(stderr.contains("lonely:mask_geometry_infeasible: 2000"));
}

#[test]
fn test_bad_spec_path() {
    let output = pcbcoil().args(["sample", "tests/data/missing.toml"]).output().unwrap();
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("tests/data/missing.toml"));

    let output = pcbcoil().args(["sample", "tests/data/spec.ini"]).output().unwrap();
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Unsupported filetype"));
}

#[test]
fn test_invalid_spec_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = dir.path().join("bad.toml");
    let text = std::fs::read_to_string("tests/data/basic_spec.toml").unwrap()
        .replace("fill_scale = [0.7, 0.9, 0.1]", "fill_scale = [0.7, 1.2, 0.1]");
    std::fs::write(&spec_path, text).unwrap();

    let output = pcbcoil().arg("sample").arg(&spec_path).output().unwrap();
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("fill_scale must be within (0, 1]"));
}
