use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use std::path::{Path, PathBuf};

use crate::errors::UnitBenchError;

/// Target for per-sample timing records, routed to `metrics.log`.
pub const METRICS_TARGET: &str = "unitbench::metrics";

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const CONSOLE_PATTERN: &str = "[{l}] {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

fn logging_err(e: impl std::fmt::Display) -> UnitBenchError {
    UnitBenchError::Logging(e.to_string())
}

/// Map `error|warn|info|debug|trace` onto a filter; anything else is `info`.
#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Initializes logging from a log4rs YAML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the logger is already set.
pub fn init_path(path: &Path) -> Result<(), UnitBenchError> {
    log4rs::init_file(path, log4rs::config::Deserializers::default()).map_err(logging_err)
}

fn rolling(base: &Path, stem: &str, keep: u32) -> Result<RollingFileAppender, UnitBenchError> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join(format!("{stem}.{{}}.log")).display()), keep)
        .map_err(logging_err)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(base.join(format!("{stem}.log")), Box::new(policy))
        .map_err(logging_err)
}

fn stderr_appender(threshold: LevelFilter) -> Appender {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    Appender::builder()
        .filter(Box::new(ThresholdFilter::new(threshold)))
        .build("stderr", Box::new(console))
}

/// Build the file-backed configuration without installing it.
///
/// - `dir`: base directory for `app.log` and `metrics.log`; current directory if `None`.
/// - `level`: error|warn|info|debug|trace
/// - `retention`: number of rolled files kept per log (default 7)
///
/// Warnings and errors are also echoed to stderr.
///
/// # Errors
/// Returns an error if the directory cannot be created or an appender fails to build.
pub fn build_config(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
) -> Result<Config, UnitBenchError> {
    let base = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    std::fs::create_dir_all(&base)?;
    let keep = u32::try_from(retention.unwrap_or(7)).unwrap_or(u32::MAX);
    let lvl = parse_level(level);
    let app = rolling(&base, "app", keep)?;
    let metrics = rolling(&base, "metrics", keep)?;
    Config::builder()
        .appender(Appender::builder().build("app", Box::new(app)))
        .appender(Appender::builder().build("metrics", Box::new(metrics)))
        .appender(stderr_appender(LevelFilter::Warn))
        .logger(Logger::builder().appender("metrics").additive(false).build(METRICS_TARGET, lvl))
        .build(Root::builder().appender("app").appender("stderr").build(lvl))
        .map_err(logging_err)
}

/// Configure file logging globally for the process.
///
/// # Errors
/// See [`build_config`]; also fails if a logger is already installed.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
) -> Result<(), UnitBenchError> {
    let config = build_config(dir, level, retention)?;
    log4rs::init_config(config).map_err(logging_err)?;
    Ok(())
}

/// Configure stderr-only logging, used when no log directory is configured.
///
/// # Errors
/// Fails if a logger is already installed.
pub fn configure_console(level: Option<&str>) -> Result<(), UnitBenchError> {
    let lvl = parse_level(level);
    let config = Config::builder()
        .appender(stderr_appender(lvl))
        .build(Root::builder().appender("stderr").build(lvl))
        .map_err(logging_err)?;
    log4rs::init_config(config).map_err(logging_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_defaults_to_info() {
        assert_eq!(parse_level(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(parse_level(Some("warn")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("bogus")), LevelFilter::Info);
        assert_eq!(parse_level(None), LevelFilter::Info);
    }

    #[test]
    fn build_config_creates_log_dir_without_installing() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let cfg = build_config(Some(&logs), Some("debug"), Some(3)).unwrap();
        assert!(logs.is_dir());
        assert_eq!(cfg.root().level(), LevelFilter::Debug);
        assert!(cfg.loggers().iter().any(|l| l.name() == METRICS_TARGET));
    }
}
