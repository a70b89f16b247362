use std::process::Command;

fn write_config(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write config");
    path
}

fn render_status(config: &std::path::Path) -> Option<i32> {
    Command::new(env!("CARGO_BIN_EXE_cpwgen"))
        .args(["render", config.to_string_lossy().as_ref()])
        .status()
        .expect("run cpwgen render")
        .code()
}

#[test]
fn exit_code_usage_is_1_for_missing_args() {
    let status = Command::new(env!("CARGO_BIN_EXE_cpwgen"))
        .args(["render"])
        .status()
        .expect("run cpwgen");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn exit_code_usage_is_1_for_unknown_format() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "empty.yaml", "components: {}\n");
    let status = Command::new(env!("CARGO_BIN_EXE_cpwgen"))
        .args(["render", config.to_string_lossy().as_ref(), "--format", "gds"])
        .status()
        .expect("run cpwgen");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn exit_code_input_is_2_for_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert_eq!(render_status(&dir.path().join("nope.yaml")), Some(2));
}

#[test]
fn exit_code_input_is_2_for_invalid_yaml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = write_config(&dir, "bad.yaml", "components: [1, 2,");
    assert_eq!(render_status(&bad), Some(2));
}

#[test]
fn exit_code_input_is_2_for_unknown_component_class() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "q.yaml", "components:\n  q1:\n    class: transmon\n");
    assert_eq!(render_status(&config), Some(2));
}

#[test]
fn exit_code_processing_is_3_when_a_path_cannot_be_planned() {
    let dir = tempfile::tempdir().expect("tempdir");
    // The two vertices collapse onto one grid point at 1um precision.
    let config = write_config(
        &dir,
        "collapse.yaml",
        r#"
components:
  bus:
    class: route
    options:
      points: [[0, 0], [0.1um, 0]]
      make_airbridge: true
airbridges:
  footprint: { class: airbridge }
  bridge_pitch: 0.1mm
  bridge_minimum_spacing: 5um
  precision: 1um
"#,
    );
    assert_eq!(render_status(&config), Some(3));
}

#[test]
fn exit_code_success_is_0() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "empty.yaml", "components: {}\n");
    assert_eq!(render_status(&config), Some(0));
}
