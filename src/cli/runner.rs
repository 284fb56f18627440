use crate::config::HarnessSettings;
use crate::generator::generate_file;
use crate::harness::{
    Experiment, ExperimentReport, InferenceTool, ScriptTool, generate_experiment, perform_experiment,
};

use super::command::Command;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
    Json,
}

pub fn run(settings: &HarnessSettings, cmd: Command) -> Result<(), Box<dyn std::error::Error>> {
    run_with_format(settings, cmd, OutputMode::Human)
}

/// Execute `cmd`, building the inference tool from `settings` when the
/// command needs one.
pub fn run_with_format(
    settings: &HarnessSettings,
    cmd: Command,
    mode: OutputMode,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::Generate { .. } | Command::ShowConfig => execute(settings, cmd, mode, None),
        Command::Infer { .. } | Command::Experiment { .. } => {
            let tool = ScriptTool::from_settings(settings)?;
            execute(settings, cmd, mode, Some(&tool))
        }
    }
}

/// Execute `cmd` against a caller-supplied inference tool.
pub fn run_with_tool(
    settings: &HarnessSettings,
    cmd: Command,
    mode: OutputMode,
    tool: &dyn InferenceTool,
) -> Result<(), Box<dyn std::error::Error>> {
    execute(settings, cmd, mode, Some(tool))
}

fn execute(
    settings: &HarnessSettings,
    cmd: Command,
    mode: OutputMode,
    tool: Option<&dyn InferenceTool>,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::Generate { mut config, out_dir } => {
            if settings.units.is_some() {
                config.units = settings.unit_pool();
            }
            let dir = out_dir.unwrap_or_else(|| settings.output_dir());
            let mut picker = settings.picker();
            let path = generate_file(&dir, &config, &mut picker)?;
            match mode {
                OutputMode::Json => {
                    let json = serde_json::json!({"action": "generated", "name": config.file_name(), "path": path});
                    println!("{json}");
                }
                OutputMode::Plain => println!("{}", path.display()),
                OutputMode::Human => println!("Generated microbenchmark: {}", path.display()),
            }
            Ok(())
        }
        Command::Infer { files } => {
            let tool = tool.ok_or("no inference tool configured")?;
            let mut failed = 0usize;
            let mut rows = Vec::with_capacity(files.len());
            for f in &files {
                match tool.solve_time(f) {
                    Ok(ms) => {
                        match mode {
                            OutputMode::Json => {}
                            OutputMode::Plain => println!("file={} solve_ms={ms}", f.display()),
                            OutputMode::Human => println!("{}, {ms}", f.display()),
                        }
                        rows.push(serde_json::json!({"file": f, "solve_ms": ms}));
                    }
                    Err(e) => {
                        failed += 1;
                        log::warn!("inference failed for {}: {e}", f.display());
                        if mode != OutputMode::Json {
                            eprintln!("{}: {e}", f.display());
                        }
                        rows.push(serde_json::json!({"file": f, "error": e.to_string()}));
                    }
                }
            }
            if mode == OutputMode::Json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            if failed > 0 {
                return Err(format!("{failed} of {} files produced no statistic", files.len()).into());
            }
            Ok(())
        }
        Command::Experiment { id, params, csv } => {
            let tool = tool.ok_or("no inference tool configured")?;
            let experiment = Experiment::from_id(id)?;
            let dir = settings.output_dir();
            let mut picker = settings.picker();
            let files = generate_experiment(experiment, &params, &dir, &settings.unit_pool(), &mut picker)?;
            log::info!(
                "experiment {id}: {} files in {}",
                files.iter().map(|k| k.files.len()).sum::<usize>(),
                dir.display()
            );
            let replicates = settings.replicates();
            let results = perform_experiment(&files, tool, replicates)?;
            let report = ExperimentReport::new(experiment, replicates, results);
            match mode {
                OutputMode::Json => println!("{}", report.to_json()?),
                OutputMode::Plain => print!("{}", report.render_plain()),
                OutputMode::Human => print!("{}", report.render_human()),
            }
            if let Some(path) = csv {
                report.write_csv(&path)?;
            }
            let failures = report.failures();
            if failures > 0 {
                log::warn!("experiment {id}: {failures} files produced no statistic");
            }
            Ok(())
        }
        Command::ShowConfig => {
            match mode {
                OutputMode::Json => println!("{}", serde_json::to_string_pretty(settings)?),
                _ => print!("{}", toml::to_string(settings)?),
            }
            Ok(())
        }
    }
}
