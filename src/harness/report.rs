use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::errors::UnitBenchError;
use crate::harness::experiment::{Experiment, OpKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Measurement {
    /// Truncated mean across replicates, in milliseconds.
    Measured { solve_ms: u64 },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    pub path: PathBuf,
    #[serde(flatten)]
    pub measurement: Measurement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindResults {
    pub kind: OpKind,
    pub files: Vec<FileResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub experiment: Experiment,
    pub replicates: u32,
    pub generated_at: DateTime<Local>,
    pub kinds: Vec<KindResults>,
}

impl ExperimentReport {
    #[must_use]
    pub fn new(experiment: Experiment, replicates: u32, kinds: Vec<KindResults>) -> Self {
        Self { experiment, replicates, generated_at: Local::now(), kinds }
    }

    #[must_use]
    pub fn failures(&self) -> usize {
        self.kinds
            .iter()
            .flat_map(|k| &k.files)
            .filter(|f| matches!(f.measurement, Measurement::Failed { .. }))
            .count()
    }

    /// One block per kind: a blank line, the kind name, then `<file>, <ms>`.
    #[must_use]
    pub fn render_human(&self) -> String {
        let mut out = String::new();
        for kind in &self.kinds {
            let _ = write!(out, "\n{}\n", kind.kind.name());
            for f in &kind.files {
                let _ = match &f.measurement {
                    Measurement::Measured { solve_ms } => writeln!(out, "{}, {solve_ms}", f.path.display()),
                    Measurement::Failed { reason } => writeln!(out, "{}, failed ({reason})", f.path.display()),
                };
            }
        }
        out
    }

    #[must_use]
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for kind in &self.kinds {
            for f in &kind.files {
                let _ = match &f.measurement {
                    Measurement::Measured { solve_ms } => writeln!(
                        out,
                        "kind={} file={} solve_ms={solve_ms}",
                        kind.kind.name(),
                        f.path.display()
                    ),
                    Measurement::Failed { .. } => {
                        writeln!(out, "kind={} file={} status=failed", kind.kind.name(), f.path.display())
                    }
                };
            }
        }
        out
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, UnitBenchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `kind,file,solve_ms,status` rows to `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn write_csv(&self, path: &Path) -> Result<(), UnitBenchError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["kind", "file", "solve_ms", "status"])?;
        for kind in &self.kinds {
            for f in &kind.files {
                let file = f.path.display().to_string();
                let (ms, status) = match &f.measurement {
                    Measurement::Measured { solve_ms } => (solve_ms.to_string(), "ok".to_string()),
                    Measurement::Failed { reason } => (String::new(), format!("failed: {reason}")),
                };
                wtr.write_record([kind.kind.name(), file.as_str(), ms.as_str(), status.as_str()])?;
            }
        }
        wtr.flush()?;
        log::info!("results written to {}", path.display());
        Ok(())
    }
}
