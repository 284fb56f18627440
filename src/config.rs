//! Harness settings: where artifacts go, how the inference tool is invoked,
//! and how many replicates to run.
//!
//! Precedence is CLI > environment (`UNITBENCH_*`) > config files > defaults.
//! The CLI layer applies its overrides on top of [`load_settings`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::UnitBenchError;
use crate::generator::RandomPicker;
use crate::types::{UnitLabel, default_units};

pub const DEFAULT_OUTPUT_DIR: &str = "generated_microbenchmarks";
pub const DEFAULT_STATISTIC_KEY: &str = "smt_solving_time(millisec)";
pub const DEFAULT_REPLICATES: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessSettings {
    pub output_dir: Option<PathBuf>,
    pub inference_script: Option<PathBuf>,
    /// Boolean passed as the first argument to the inference script.
    pub tool_flag: Option<bool>,
    pub statistic_key: Option<String>,
    /// When set, the statistic is read from this file after each run instead
    /// of from the tool's stdout.
    pub statistics_file: Option<PathBuf>,
    pub replicates: Option<u32>,
    pub units: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl HarnessSettings {
    /// Fill every unset field from `other`.
    pub fn merge_missing(&mut self, other: HarnessSettings) {
        if self.output_dir.is_none() { self.output_dir = other.output_dir; }
        if self.inference_script.is_none() { self.inference_script = other.inference_script; }
        if self.tool_flag.is_none() { self.tool_flag = other.tool_flag; }
        if self.statistic_key.is_none() { self.statistic_key = other.statistic_key; }
        if self.statistics_file.is_none() { self.statistics_file = other.statistics_file; }
        if self.replicates.is_none() { self.replicates = other.replicates; }
        if self.units.is_none() { self.units = other.units; }
        if self.seed.is_none() { self.seed = other.seed; }
        if self.log_dir.is_none() { self.log_dir = other.log_dir; }
        if self.log_level.is_none() { self.log_level = other.log_level; }
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    #[must_use]
    pub fn tool_flag(&self) -> bool {
        self.tool_flag.unwrap_or(true)
    }

    #[must_use]
    pub fn statistic_key(&self) -> &str {
        self.statistic_key.as_deref().unwrap_or(DEFAULT_STATISTIC_KEY)
    }

    #[must_use]
    pub fn replicates(&self) -> u32 {
        self.replicates.unwrap_or(DEFAULT_REPLICATES)
    }

    #[must_use]
    pub fn unit_pool(&self) -> Vec<UnitLabel> {
        match &self.units {
            Some(units) => units.iter().map(|u| UnitLabel::from(u.as_str())).collect(),
            None => default_units(),
        }
    }

    #[must_use]
    pub fn picker(&self) -> RandomPicker {
        match self.seed {
            Some(seed) => RandomPicker::seeded(seed),
            None => RandomPicker::from_entropy(),
        }
    }

    /// Read the `UNITBENCH_*` variables through `env`.
    ///
    /// # Errors
    /// `Config` when a numeric or boolean variable does not parse.
    pub fn from_env(env: impl Fn(&str) -> Option<String>) -> Result<Self, UnitBenchError> {
        fn parsed<T: std::str::FromStr>(
            env: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Result<Option<T>, UnitBenchError> {
            match env(key) {
                Some(v) => v
                    .trim()
                    .parse::<T>()
                    .map(Some)
                    .map_err(|_| UnitBenchError::Config(format!("{key}: cannot parse '{v}'"))),
                None => Ok(None),
            }
        }
        Ok(Self {
            output_dir: env("UNITBENCH_OUTPUT_DIR").map(PathBuf::from),
            inference_script: env("UNITBENCH_SCRIPT").map(PathBuf::from),
            tool_flag: parsed(&env, "UNITBENCH_TOOL_FLAG")?,
            statistic_key: env("UNITBENCH_STATISTIC"),
            statistics_file: env("UNITBENCH_STATS_FILE").map(PathBuf::from),
            replicates: parsed(&env, "UNITBENCH_REPLICATES")?,
            units: env("UNITBENCH_UNITS").map(|s| split_list(&s)),
            seed: parsed(&env, "UNITBENCH_SEED")?,
            log_dir: env("UNITBENCH_LOG_DIR").map(PathBuf::from),
            log_level: env("UNITBENCH_LOG_LEVEL"),
        })
    }

    /// Parse a TOML settings document.
    ///
    /// # Errors
    /// `Config` when the document is not valid TOML for these settings.
    pub fn from_toml_str(s: &str) -> Result<Self, UnitBenchError> {
        toml::from_str(s).map_err(|e| UnitBenchError::Config(e.to_string()))
    }
}

/// Split a comma-separated list, dropping empty entries.
#[must_use]
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty()).map(String::from).collect()
}

/// Candidate config files in lookup order; earlier files win.
#[must_use]
pub fn find_config_paths(cli_cfg: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg { paths.push(p.to_path_buf()); }
    if let Ok(p) = std::env::var("UNITBENCH_CONFIG") { paths.push(PathBuf::from(p)); }
    if let Ok(home) = std::env::var("USERPROFILE").or_else(|_| std::env::var("HOME")) {
        paths.push(PathBuf::from(home).join(".unitbenchrc"));
    }
    if let Some(cfg_dir) = dirs_next::config_dir() { paths.push(cfg_dir.join("unitbench.toml")); }
    if let Ok(cur) = std::env::current_dir() { paths.push(cur.join("unitbench.toml")); }
    paths
}

/// Merge environment and config files. Unreadable or malformed files are
/// skipped with a warning.
///
/// # Errors
/// `Config` when an environment variable is malformed.
pub fn load_settings_from(
    paths: &[PathBuf],
    env: impl Fn(&str) -> Option<String>,
) -> Result<HarnessSettings, UnitBenchError> {
    let mut cfg = HarnessSettings::from_env(env)?;
    for p in paths {
        if !p.exists() {
            continue;
        }
        match std::fs::read_to_string(p) {
            Ok(s) => match HarnessSettings::from_toml_str(&s) {
                Ok(file_cfg) => cfg.merge_missing(file_cfg),
                Err(e) => log::warn!("skipping config {}: {e}", p.display()),
            },
            Err(e) => log::warn!("cannot read config {}: {e}", p.display()),
        }
    }
    Ok(cfg)
}

/// Load settings from the process environment and the standard config paths.
///
/// # Errors
/// See [`load_settings_from`].
pub fn load_settings(cli_cfg: Option<&Path>) -> Result<HarnessSettings, UnitBenchError> {
    load_settings_from(&find_config_paths(cli_cfg), |k| std::env::var(k).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset() {
        let s = HarnessSettings::default();
        assert_eq!(s.output_dir(), PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(s.statistic_key(), DEFAULT_STATISTIC_KEY);
        assert_eq!(s.replicates(), 3);
        assert!(s.tool_flag());
        assert_eq!(s.unit_pool().len(), 7);
    }

    #[test]
    fn env_values_are_parsed() {
        let vars: HashMap<&str, &str> = [
            ("UNITBENCH_REPLICATES", "5"),
            ("UNITBENCH_UNITS", "m, s ,,kg"),
            ("UNITBENCH_TOOL_FLAG", "false"),
        ]
        .into_iter()
        .collect();
        let s = HarnessSettings::from_env(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(s.replicates, Some(5));
        assert_eq!(s.units, Some(vec!["m".into(), "s".into(), "kg".into()]));
        assert_eq!(s.tool_flag, Some(false));
    }

    #[test]
    fn malformed_env_value_is_an_error() {
        let err = HarnessSettings::from_env(|k| (k == "UNITBENCH_SEED").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, UnitBenchError::Config(_)));
    }

    #[test]
    fn merge_keeps_existing_values() {
        let mut a = HarnessSettings { replicates: Some(1), ..Default::default() };
        let b = HarnessSettings { replicates: Some(9), seed: Some(4), ..Default::default() };
        a.merge_missing(b);
        assert_eq!(a.replicates, Some(1));
        assert_eq!(a.seed, Some(4));
    }
}
