use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};

use scara_gcode::config::Config;
use scara_gcode::pipeline::{self, Pipeline, Statistics};

fn main() -> Result<()> {
    // Parse configuration from command line and environment
    let config = Config::from_args_and_env()?;

    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    match &config.machine_config_path {
        Some(path) => log::info!("Using machine config {}", path.display()),
        None => log::info!("Using embedded machine config"),
    }

    let program = read_program(&config.input)?;
    let output = Pipeline::new(config.machine.clone()).process(&program);

    for error in &output.errors {
        log::error!("{}", error);
    }

    if let Some(lines) = config.preview_lines {
        println!("{}", pipeline::preview(&output.commands, lines));
    }

    if config.print_stats {
        if let Some(stats) = Statistics::from_output(&output) {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    if config.strict && !output.is_clean() {
        bail!(
            "{} unreachable points, not writing {}",
            output.errors.len(),
            config.output.display()
        );
    }

    if config.output == Path::new("-") {
        pipeline::write_actuator_stream(io::stdout().lock(), &output.commands)?;
    } else {
        pipeline::export_to_file(&config.output, &output.commands)?;
    }

    Ok(())
}

fn read_program(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut program = String::new();
        io::stdin()
            .read_to_string(&mut program)
            .context("Failed to read program from stdin")?;
        return Ok(program);
    }

    fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}
