use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::HarnessSettings;
use crate::errors::UnitBenchError;

/// Anything that can turn an artifact path into a solve time in milliseconds.
pub trait InferenceTool {
    /// # Errors
    /// Returns an error when the tool cannot be launched or produces no
    /// usable statistic for `artifact`.
    fn solve_time(&self, artifact: &Path) -> Result<u64, UnitBenchError>;
}

/// Where the tool reports its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatisticSource {
    Stdout,
    /// A file the tool (re)writes on every run.
    File(PathBuf),
}

/// Runs `<script> <flag> <artifact>` and extracts one named statistic.
#[derive(Debug, Clone)]
pub struct ScriptTool {
    pub script: PathBuf,
    pub flag: bool,
    pub key: String,
    pub source: StatisticSource,
}

impl ScriptTool {
    /// # Errors
    /// `InvalidConfiguration` when no inference script is configured.
    pub fn from_settings(settings: &HarnessSettings) -> Result<Self, UnitBenchError> {
        let script = settings.inference_script.clone().ok_or_else(|| {
            UnitBenchError::invalid("no inference script configured (--script or UNITBENCH_SCRIPT)")
        })?;
        Ok(Self {
            script,
            flag: settings.tool_flag(),
            key: settings.statistic_key().to_string(),
            source: match &settings.statistics_file {
                Some(p) => StatisticSource::File(p.clone()),
                None => StatisticSource::Stdout,
            },
        })
    }
}

impl InferenceTool for ScriptTool {
    fn solve_time(&self, artifact: &Path) -> Result<u64, UnitBenchError> {
        if let StatisticSource::File(p) = &self.source
            && p.exists()
        {
            // a stale file must not stand in for this run
            std::fs::remove_file(p)?;
        }
        log::debug!("inference: {} {} {}", self.script.display(), self.flag, artifact.display());
        let output = Command::new(&self.script)
            .arg(self.flag.to_string())
            .arg(artifact)
            .output()
            .map_err(|e| UnitBenchError::ToolLaunch {
                tool: self.script.display().to_string(),
                reason: e.to_string(),
            })?;
        if !output.status.success() {
            // inference may fail on a benchmark and still report its timings
            log::warn!("inference exited with {} for {}", output.status, artifact.display());
        }
        match &self.source {
            StatisticSource::Stdout => {
                let text = String::from_utf8_lossy(&output.stdout);
                parse_statistic(&text, &self.key, "tool output")
            }
            StatisticSource::File(p) => {
                let text = std::fs::read_to_string(p).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => UnitBenchError::MissingStatistic {
                        key: self.key.clone(),
                        source_name: p.display().to_string(),
                    },
                    _ => UnitBenchError::Io(e),
                })?;
                parse_statistic(&text, &self.key, &p.display().to_string())
            }
        }
    }
}

/// Find the first line starting with `key` and parse the text after its
/// first space (the whole line if it has none) as milliseconds.
///
/// # Errors
/// `MissingStatistic` if no line matches, `MalformedStatistic` if the value
/// is not a non-negative integer.
pub fn parse_statistic(text: &str, key: &str, source_name: &str) -> Result<u64, UnitBenchError> {
    let line = text.lines().find(|l| l.starts_with(key)).ok_or_else(|| {
        UnitBenchError::MissingStatistic { key: key.to_string(), source_name: source_name.to_string() }
    })?;
    let value = line.split_once(' ').map_or(line, |(_, v)| v).trim();
    value.parse::<u64>().map_err(|_| UnitBenchError::MalformedStatistic {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STATISTIC_KEY;

    #[test]
    fn parses_first_matching_line() {
        let out = "constraints 12\nsmt_solving_time(millisec) 431\nsmt_solving_time(millisec) 9\n";
        assert_eq!(parse_statistic(out, DEFAULT_STATISTIC_KEY, "stdout").unwrap(), 431);
    }

    #[test]
    fn missing_and_malformed_are_distinct() {
        let missing = parse_statistic("nothing here", DEFAULT_STATISTIC_KEY, "stdout").unwrap_err();
        assert!(matches!(missing, UnitBenchError::MissingStatistic { .. }));
        let bad = parse_statistic("smt_solving_time(millisec) fast", DEFAULT_STATISTIC_KEY, "stdout")
            .unwrap_err();
        assert!(matches!(bad, UnitBenchError::MalformedStatistic { .. }));
    }

    #[test]
    fn from_settings_requires_a_script() {
        assert!(ScriptTool::from_settings(&HarnessSettings::default()).is_err());
        let settings = HarnessSettings {
            inference_script: Some("run-units-infer.sh".into()),
            statistics_file: Some("statistics.txt".into()),
            ..Default::default()
        };
        let tool = ScriptTool::from_settings(&settings).unwrap();
        assert!(tool.flag);
        assert_eq!(tool.source, StatisticSource::File("statistics.txt".into()));
    }
}
