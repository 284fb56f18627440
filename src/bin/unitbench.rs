use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use unitbench::cli::{self as prog_cli, parse_kinds, parse_output_mode};
use unitbench::config::{HarnessSettings, load_settings};
use unitbench::generator::{ArithmeticKnobs, ComparisonKnobs, FileConfig};
use unitbench::harness::SweepParams;
use unitbench::logger;
use unitbench::types::default_units;

#[derive(Parser, Debug)]
#[command(name = "unitbench", version, about = "Unit-inference microbenchmark generator and runner", long_about = None)]
struct Cli {
    #[arg(long, global = true, help = "Path to a config file (TOML). If omitted, the standard locations are searched.")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Output format: human|plain|json")]
    output: Option<String>,
    #[arg(long, global = true, help = "Directory for app.log and metrics.log; stderr only if unset")]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Log level: error|warn|info|debug|trace")]
    log_level: Option<String>,
    #[arg(long, global = true, help = "log4rs YAML file; overrides --log-dir and --log-level")]
    log_config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Generate one microbenchmark file")]
    Generate(GenerateArgs),
    #[command(about = "Run the inference tool on existing files and print the solve time")]
    Infer {
        #[arg(required = true, help = "Generated files to measure")]
        files: Vec<PathBuf>,
        #[command(flatten)]
        tool: ToolArgs,
    },
    #[command(about = "Generate a parameter sweep, measure every file and report averages")]
    Experiment {
        #[arg(help = "1: groups x ops, 2: same with end annotation and 75% annotated, 3: fixed total ops")]
        id: u8,
        #[arg(long, help = "Replicate runs per file (default 3)")]
        replicates: Option<u32>,
        #[arg(long, help = "Directory for generated files")]
        out_dir: Option<PathBuf>,
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, help = "Group counts to sweep (comma-separated)")]
        groups: Option<Vec<i64>>,
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, help = "Operations per group to sweep (comma-separated)")]
        per_group: Option<Vec<i64>>,
        #[arg(long, help = "Total operations for experiment 3")]
        total: Option<i64>,
        #[arg(long, value_delimiter = ',', help = "Kinds to sweep: add,mult,comp")]
        kinds: Option<Vec<String>>,
        #[arg(long, help = "Also write results as CSV to this path")]
        csv: Option<PathBuf>,
        #[arg(long, help = "Seed for the unit choice of addition/comparison groups")]
        seed: Option<u64>,
        #[command(flatten)]
        tool: ToolArgs,
    },
    #[command(name = "config", about = "Print the effective settings")]
    ShowConfig,
}

#[derive(Args, Debug)]
struct ToolArgs {
    #[arg(long, help = "Inference script, invoked as <script> <flag> <file>")]
    script: Option<PathBuf>,
    #[arg(long, help = "Read the statistic from this file instead of stdout")]
    stats_file: Option<PathBuf>,
    #[arg(long, help = "Statistic key (default smt_solving_time(millisec))")]
    statistic: Option<String>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help = "Number of multiplications in each group")]
    mult: i64,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true, help = "Number of groups of multiplications")]
    mult_groups: i64,
    #[arg(long, help = "Annotate the end variable of the multiplications in each group")]
    mult_end: bool,
    #[arg(long, help = "One multiplication per line with intermediate result variables")]
    mult_perline: bool,
    #[arg(long, help = "Do not prepend a constant, so variables exceed multiplications by one")]
    mult_nocorrection: bool,
    #[arg(long, default_value_t = 100, allow_negative_numbers = true, help = "Percentage of starting variables annotated with a unit")]
    mult_annot: i64,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help = "Number of additions in each group")]
    add: i64,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true, help = "Number of groups of additions")]
    add_groups: i64,
    #[arg(long, help = "Annotate the end variable of the additions in each group")]
    add_end: bool,
    #[arg(long, help = "One addition per line with intermediate result variables")]
    add_perline: bool,
    #[arg(long, help = "Do not prepend a constant, so variables exceed additions by one")]
    add_nocorrection: bool,
    #[arg(long, default_value_t = 100, allow_negative_numbers = true, help = "Percentage of starting variables annotated with a unit")]
    add_annot: i64,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help = "Number of comparisons in each group")]
    comp: i64,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true, help = "Number of groups of comparisons")]
    comp_groups: i64,
    #[arg(long, help = "Do not prepend a constant, so variables exceed comparisons by one")]
    comp_nocorrection: bool,
    #[arg(long, default_value_t = 100, allow_negative_numbers = true, help = "Percentage of starting variables annotated with a unit")]
    comp_annot: i64,

    #[arg(long, help = "Directory for the generated file")]
    out_dir: Option<PathBuf>,
    #[arg(long, help = "Seed for the unit choice of addition/comparison groups")]
    seed: Option<u64>,
}

impl GenerateArgs {
    fn file_config(&self) -> FileConfig {
        FileConfig {
            mult: ArithmeticKnobs {
                groups: self.mult_groups,
                ops: self.mult,
                end: self.mult_end,
                per_line: self.mult_perline,
                no_correction: self.mult_nocorrection,
                annot: self.mult_annot,
            },
            add: ArithmeticKnobs {
                groups: self.add_groups,
                ops: self.add,
                end: self.add_end,
                per_line: self.add_perline,
                no_correction: self.add_nocorrection,
                annot: self.add_annot,
            },
            comp: ComparisonKnobs {
                groups: self.comp_groups,
                ops: self.comp,
                no_correction: self.comp_nocorrection,
                annot: self.comp_annot,
            },
            units: default_units(),
        }
    }
}

fn apply_tool_args(settings: &mut HarnessSettings, tool: ToolArgs) {
    if tool.script.is_some() { settings.inference_script = tool.script; }
    if tool.stats_file.is_some() { settings.statistics_file = tool.stats_file; }
    if tool.statistic.is_some() { settings.statistic_key = tool.statistic; }
}

fn init_logging(log_config: Option<&Path>, settings: &HarnessSettings) {
    let level = settings.log_level.as_deref();
    let retention = std::env::var("UNITBENCH_LOG_RETENTION").ok().and_then(|s| s.parse().ok());
    let res = match (log_config, &settings.log_dir) {
        (Some(path), _) => logger::init_path(path),
        (None, Some(dir)) => logger::configure_logging(Some(dir.as_path()), level, retention),
        (None, None) => logger::configure_console(level),
    };
    if let Err(e) = res { eprintln!("warning: logging disabled: {e}"); }
}

fn main() {
    let cli = Cli::parse();
    let mut settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => { eprintln!("error: {e}"); std::process::exit(1); }
    };
    // CLI takes precedence over env and config files
    if cli.log_dir.is_some() { settings.log_dir = cli.log_dir; }
    if cli.log_level.is_some() { settings.log_level = cli.log_level; }
    let mode = parse_output_mode(cli.output.as_deref());

    let cmd = match cli.command {
        Commands::Generate(args) => {
            if args.seed.is_some() { settings.seed = args.seed; }
            prog_cli::Command::Generate { config: args.file_config(), out_dir: args.out_dir }
        }
        Commands::Infer { files, tool } => {
            apply_tool_args(&mut settings, tool);
            prog_cli::Command::Infer { files }
        }
        Commands::Experiment { id, replicates, out_dir, groups, per_group, total, kinds, csv, seed, tool } => {
            apply_tool_args(&mut settings, tool);
            if replicates.is_some() { settings.replicates = replicates; }
            if out_dir.is_some() { settings.output_dir = out_dir; }
            if seed.is_some() { settings.seed = seed; }
            let mut params = SweepParams::default();
            if let Some(g) = groups { params.group_counts = g; }
            if let Some(p) = per_group { params.per_group = p; }
            if let Some(t) = total { params.total_ops = t; }
            if let Some(k) = kinds {
                match parse_kinds(&k) {
                    Ok(parsed) => params.kinds = parsed,
                    Err(e) => { eprintln!("error: {e}"); std::process::exit(1); }
                }
            }
            prog_cli::Command::Experiment { id, params, csv }
        }
        Commands::ShowConfig => prog_cli::Command::ShowConfig,
    };

    init_logging(cli.log_config.as_deref(), &settings);
    if let Err(e) = prog_cli::run_with_format(&settings, cmd, mode) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
