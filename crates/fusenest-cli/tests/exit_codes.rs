use std::process::Command;

const TRIANGLE: &str = r#"
profiles:
  - loops:
      - outer: true
        curves:
          - { type: line, start: { x: 0, y: 0 }, end: { x: 10, y: 0 } }
          - { type: line, start: { x: 10, y: 0 }, end: { x: 0, y: 10 } }
          - { type: line, start: { x: 0, y: 10 }, end: { x: 0, y: 0 } }
"#;

#[test]
fn exit_code_usage_is_1_for_missing_args() {
    let bin = env!("CARGO_BIN_EXE_fusenest");
    let status = Command::new(bin)
        .args(["encode"])
        .status()
        .expect("run fusenest");
    assert_eq!(status.code(), Some(1));

    let status = Command::new(bin)
        .args(["nest", "parts.yaml"])
        .status()
        .expect("run fusenest");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn help_exits_cleanly() {
    let bin = env!("CARGO_BIN_EXE_fusenest");
    let status = Command::new(bin)
        .args(["--help"])
        .output()
        .expect("run fusenest --help")
        .status;
    assert_eq!(status.code(), Some(0));
}

#[test]
fn exit_code_input_is_2_for_missing_file() {
    let bin = env!("CARGO_BIN_EXE_fusenest");
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.yaml");

    let status = Command::new(bin)
        .args(["encode", missing.to_string_lossy().as_ref()])
        .status()
        .expect("run fusenest encode");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn exit_code_input_is_2_for_invalid_yaml() {
    let bin = env!("CARGO_BIN_EXE_fusenest");
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = dir.path().join("bad.yaml");
    std::fs::write(&bad, "profiles: [1, 2,").expect("write bad yaml");

    let status = Command::new(bin)
        .args(["encode", bad.to_string_lossy().as_ref()])
        .status()
        .expect("run fusenest encode");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn exit_code_input_is_2_for_bad_sheet() {
    let bin = env!("CARGO_BIN_EXE_fusenest");
    let dir = tempfile::tempdir().expect("tempdir");
    let parts = dir.path().join("parts.yaml");
    std::fs::write(&parts, TRIANGLE).expect("write parts");

    let status = Command::new(bin)
        .args(["encode", parts.to_string_lossy().as_ref(), "--width", "0"])
        .status()
        .expect("run fusenest encode");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn exit_code_input_is_2_for_malformed_transform() {
    let bin = env!("CARGO_BIN_EXE_fusenest");
    let dir = tempfile::tempdir().expect("tempdir");
    let doc = dir.path().join("placed.svg");
    std::fs::write(
        &doc,
        r#"<svg><g><g transform="translate(1)"><path id="0"/></g></g></svg>"#,
    )
    .expect("write svg");

    let output = Command::new(bin)
        .args(["decode", doc.to_string_lossy().as_ref()])
        .output()
        .expect("run fusenest decode");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("path 0"));
}

#[test]
fn exit_code_processing_is_3_for_unwritable_output() {
    let bin = env!("CARGO_BIN_EXE_fusenest");
    let dir = tempfile::tempdir().expect("tempdir");
    let parts = dir.path().join("parts.yaml");
    std::fs::write(&parts, TRIANGLE).expect("write parts");
    let output = dir.path().join("missing-dir").join("out.svg");

    let status = Command::new(bin)
        .args([
            "encode",
            parts.to_string_lossy().as_ref(),
            "--output",
            output.to_string_lossy().as_ref(),
        ])
        .status()
        .expect("run fusenest encode");
    assert_eq!(status.code(), Some(3));
}

#[test]
fn exit_code_success_is_0() {
    let bin = env!("CARGO_BIN_EXE_fusenest");
    let dir = tempfile::tempdir().expect("tempdir");
    let parts = dir.path().join("parts.yaml");
    std::fs::write(&parts, TRIANGLE).expect("write parts");

    let output = Command::new(bin)
        .args(["encode", parts.to_string_lossy().as_ref()])
        .output()
        .expect("run fusenest encode");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("L 1000.000000 0.000000 L 0.000000 -1000.000000"));
}
