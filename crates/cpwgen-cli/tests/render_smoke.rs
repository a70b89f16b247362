use std::process::Command;

const DESIGN: &str = r#"
variables:
  cpw_width: 10um
  cpw_gap: 6um
components:
  feedline:
    class: route
    options:
      points: [[0, 0], [1mm, 0], [1mm, 1mm]]
      fillet: 100um
      make_airbridge: true
  coupler:
    class: coupled_line_tee
    options:
      pos_y: -1mm
airbridges:
  footprint:
    class: airbridge
    options:
      crossover_length: cpw_width + 2*cpw_gap
  bridge_pitch: 0.15mm
  bridge_minimum_spacing: 5um
"#;

fn render(args: &[&str]) -> std::process::Output {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("design.yaml");
    std::fs::write(&config, DESIGN).expect("write design");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cpwgen"));
    cmd.arg("render").arg(&config).args(args);
    let output = cmd.output().expect("run cpwgen render");
    assert!(
        output.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

#[test]
fn json_report_lists_placements_and_layers() {
    let output = render(&["--format", "json"]);
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");

    assert_eq!(report["components"], serde_json::json!(["feedline", "coupler"]));

    // 0.8mm usable per leg at 0.15mm pitch: 5 + 5, plus one corner.
    let placements = report["placements"].as_array().expect("placements");
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0]["path"], "feedline.trace");
    assert_eq!(placements[0]["points"].as_array().map(Vec::len), Some(11));

    let layers = report["layers"].as_array().expect("layers");
    let ids: Vec<_> = layers.iter().map(|l| l["layer"].as_u64().unwrap()).collect();
    assert_eq!(ids, [1, 30, 31, 32]);
    for layer in &layers[1..] {
        assert_eq!(layer["positive"], 11);
    }
}

#[test]
fn summary_goes_to_stdout_and_logs_to_stderr() {
    let output = render(&["--debug"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Airbridges: 11"), "{stdout}");
    assert!(stdout.contains("feedline.trace: 11"), "{stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("placed airbridges"), "{stderr}");
}
