use scara_gcode::config::MachineConfig;
use scara_gcode::machine::{ExecutionResult, Interpreter, Units};
use scara_gcode::Waypoint;

fn run_all(interp: &mut Interpreter, lines: &[&str]) -> Vec<ExecutionResult> {
    lines
        .iter()
        .filter_map(|line| interp.execute_line(line))
        .collect()
}

#[test]
fn test_set_position_then_move_lands_offset() {
    let mut interp = Interpreter::new(MachineConfig::default());
    run_all(&mut interp, &["G90", "G0 X4 Y4", "G92 X0 Y0"]);

    let result = interp.execute_line("G1 X2 Y2").unwrap();

    assert_eq!(result.waypoints().first(), Some(&Waypoint::new(4.0, 4.0)));
    assert_eq!(result.waypoints().last(), Some(&Waypoint::new(6.0, 6.0)));
    assert_eq!(interp.state().current_position, Waypoint::new(6.0, 6.0));
    assert_eq!(interp.current_position(), Waypoint::new(2.0, 2.0));
}

#[test]
fn test_offset_applies_to_arcs() {
    let mut interp = Interpreter::new(MachineConfig::default());
    run_all(&mut interp, &["G0 X4 Y4", "G92 X0 Y0"]);

    let result = interp.execute_line("G3 X2 Y2 I1 J1").unwrap();
    match result {
        ExecutionResult::MoveArc { center, .. } => assert_eq!(center, Waypoint::new(5.0, 5.0)),
        other => panic!("Expected arc, got {other:?}"),
    }
    assert_eq!(interp.state().current_position, Waypoint::new(6.0, 6.0));
}

#[test]
fn test_incremental_moves_ignore_offset_drift() {
    let mut interp = Interpreter::new(MachineConfig::default());
    run_all(&mut interp, &["G92 X10 Y10", "G91", "G1 X1", "G1 X1"]);
    assert_eq!(interp.state().current_position, Waypoint::new(8.0, 6.0));
    assert_eq!(interp.current_position(), Waypoint::new(12.0, 10.0));
}

#[test]
fn test_mode_is_absolute_unless_last_mode_was_incremental() {
    let mut interp = Interpreter::new(MachineConfig::default());
    assert!(interp.state().absolute_mode);

    run_all(&mut interp, &["G91", "G1 X1"]);
    assert!(!interp.state().absolute_mode);

    run_all(&mut interp, &["G90", "G1 X1"]);
    assert!(interp.state().absolute_mode);
    assert_eq!(interp.current_position(), Waypoint::new(1.0, 6.0));
}

#[test]
fn test_command_count_tracks_executed_lines() {
    let mut interp = Interpreter::new(MachineConfig::default());
    run_all(&mut interp, &["G20", "; comment", "", "G21", "FOO", "M2"]);
    assert_eq!(interp.state().command_count, 4);
    assert_eq!(interp.state().units, Units::Millimeters);
}

#[test]
fn test_config_drives_initial_state() {
    let mut config = MachineConfig::default();
    config.motion.home_x = 3.0;
    config.motion.home_y = 8.0;
    config.motion.default_feed_rate = 4.5;
    config.motion.default_units = Units::Millimeters;

    let interp = Interpreter::new(config);
    assert_eq!(interp.current_position(), Waypoint::new(3.0, 8.0));
    assert_eq!(interp.state().feed_rate, 4.5);
    assert_eq!(interp.state().units, Units::Millimeters);
}
