use std::fs;

use scara_gcode::config::MachineConfig;
use scara_gcode::pipeline::{convert_program, export_to_file, Statistics};
use tempfile::tempdir;

#[test]
fn test_export_writes_one_line_per_command() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("moves.txt");

    let output = convert_program("G90\nG28\nG1 X6 Y5\nM2\n", &MachineConfig::embedded());
    let written = export_to_file(&path, &output.commands).expect("export");

    assert!(written.is_absolute());
    let content = fs::read_to_string(&path).expect("read back");
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), output.commands.len());
    assert_eq!(lines.first(), Some(&"75,120"));
    assert_eq!(lines.last(), Some(&"75,120"));
    assert!(content.ends_with('\n'));
    for line in lines {
        let (a, b) = line.split_once(',').expect("comma separated");
        assert!(a.parse::<i32>().is_ok() && b.parse::<i32>().is_ok());
    }
}

#[test]
fn test_export_refuses_empty_stream() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("moves.txt");
    assert!(export_to_file(&path, &[]).is_err());
    assert!(!path.exists());
}

#[test]
fn test_statistics_serialize_to_json() {
    let output = convert_program("G4 P2\nM2", &MachineConfig::embedded());
    let stats = Statistics::from_output(&output).expect("stats");

    let json = serde_json::to_value(&stats).expect("json");
    assert_eq!(json["total_points"], 6);
    assert_eq!(json["servo1_range"], serde_json::json!([75, 75]));
    assert_eq!(json["errors"], 0);
}
