use scara_gcode::config::MachineConfig;
use scara_gcode::pipeline::{self, Pipeline, Statistics};

fn main() {
    println!("=== SCARA Pipeline Demo ===");

    let program = r#"
G90           ; Absolute positioning
G20           ; Inches
G28           ; Home
G0 X4 Y4 F5   ; Move to start
G1 X6 Y4 F2   ; Draw line 1
G1 X6 Y6      ; Draw line 2
G1 X4 Y6      ; Draw line 3
G1 X4 Y4      ; Draw line 4 (close square)
G4 P1         ; Hold
G0 X13 Y0     ; Out of reach on purpose
G28           ; Return home
M2            ; End program
"#;

    let pipeline = Pipeline::new(MachineConfig::embedded());

    let arm = pipeline.config().arm;
    let bounds = pipeline.kinematics().workspace_bounds();
    println!(
        "Arm {} + {}, reach {:.1} to {:.1}",
        arm.l1, arm.l2, bounds.min_reach, bounds.max_reach
    );

    let output = pipeline.process(program);

    if !output.errors.is_empty() {
        println!("\nErrors encountered:");
        for error in &output.errors {
            println!("  - {}", error);
        }
    }

    println!("\n{}", pipeline::preview(&output.commands, 20));

    if let Some(stats) = Statistics::from_output(&output) {
        println!("\nStatistics: {:?}", stats);
    }
}
