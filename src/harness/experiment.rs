use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::errors::UnitBenchError;
use crate::generator::{FileConfig, UnitPicker, generate_file};
use crate::harness::inference::InferenceTool;
use crate::harness::report::{FileResult, KindResults, Measurement};
use crate::types::UnitLabel;
use crate::utils::logger::METRICS_TARGET;
use crate::utils::num::truncated_mean;

/// Which group kind an experiment varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Mult,
    Comp,
}

impl OpKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Mult => "mult",
            OpKind::Comp => "comp",
        }
    }

    /// # Errors
    /// `InvalidConfiguration` for anything other than add|mult|comp.
    pub fn parse(s: &str) -> Result<Self, UnitBenchError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(OpKind::Add),
            "mult" => Ok(OpKind::Mult),
            "comp" => Ok(OpKind::Comp),
            other => Err(UnitBenchError::invalid(format!("unknown operation kind '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Experiment {
    /// Vary group count and operations per group.
    GroupSweep,
    /// As `GroupSweep`, with end annotation and 75% of starting variables annotated.
    AnnotatedEndSweep,
    /// Fixed total operations split evenly across a varying group count.
    FixedTotal,
}

impl Experiment {
    /// # Errors
    /// `InvalidConfiguration` for ids other than 1, 2 or 3.
    pub fn from_id(id: u8) -> Result<Self, UnitBenchError> {
        match id {
            1 => Ok(Experiment::GroupSweep),
            2 => Ok(Experiment::AnnotatedEndSweep),
            3 => Ok(Experiment::FixedTotal),
            _ => Err(UnitBenchError::invalid(format!("unknown experiment {id}; expected 1, 2 or 3"))),
        }
    }

    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            Experiment::GroupSweep => 1,
            Experiment::AnnotatedEndSweep => 2,
            Experiment::FixedTotal => 3,
        }
    }
}

/// Parameter grid for an experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepParams {
    pub group_counts: Vec<i64>,
    pub per_group: Vec<i64>,
    /// Total operations for `FixedTotal`.
    pub total_ops: i64,
    pub kinds: Vec<OpKind>,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            group_counts: vec![1, 5, 10, 15, 20, 25, 30],
            per_group: vec![1, 2, 3, 5, 7, 10, 15],
            total_ops: 100,
            kinds: vec![OpKind::Add, OpKind::Mult],
        }
    }
}

fn config_for(kind: OpKind, groups: i64, ops: i64, annotate_end: bool) -> FileConfig {
    let mut cfg = match kind {
        OpKind::Add => FileConfig::default().with_add(groups, ops),
        OpKind::Mult => FileConfig::default().with_mult(groups, ops),
        OpKind::Comp => FileConfig::default().with_comp(groups, ops),
    };
    if annotate_end {
        match kind {
            OpKind::Add => {
                cfg.add.end = true;
                cfg.add.annot = 75;
            }
            OpKind::Mult => {
                cfg.mult.end = true;
                cfg.mult.annot = 75;
            }
            // comparisons have no result to annotate
            OpKind::Comp => cfg.comp.annot = 75,
        }
    }
    cfg
}

/// Expand an experiment into per-kind file configurations, in sweep order.
///
/// # Errors
/// `InvalidConfiguration` when `FixedTotal` is asked to split across zero or
/// negative groups.
pub fn experiment_configs(
    experiment: Experiment,
    params: &SweepParams,
) -> Result<Vec<(OpKind, Vec<FileConfig>)>, UnitBenchError> {
    let mut out = Vec::with_capacity(params.kinds.len());
    for &kind in &params.kinds {
        let mut configs = Vec::new();
        for &groups in &params.group_counts {
            match experiment {
                Experiment::GroupSweep | Experiment::AnnotatedEndSweep => {
                    let annotate = experiment == Experiment::AnnotatedEndSweep;
                    for &ops in &params.per_group {
                        configs.push(config_for(kind, groups, ops, annotate));
                    }
                }
                Experiment::FixedTotal => {
                    if groups <= 0 {
                        return Err(UnitBenchError::invalid(format!(
                            "cannot split {} operations across {groups} groups",
                            params.total_ops
                        )));
                    }
                    configs.push(config_for(kind, groups, params.total_ops / groups, false));
                }
            }
        }
        out.push((kind, configs));
    }
    Ok(out)
}

/// Artifacts generated for one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindFiles {
    pub kind: OpKind,
    pub files: Vec<PathBuf>,
}

/// Generate every artifact of an experiment into `out_dir`.
///
/// # Errors
/// Propagates generation and I/O errors; nothing is measured yet.
pub fn generate_experiment(
    experiment: Experiment,
    params: &SweepParams,
    out_dir: &Path,
    units: &[UnitLabel],
    picker: &mut dyn UnitPicker,
) -> Result<Vec<KindFiles>, UnitBenchError> {
    let mut out = Vec::new();
    for (kind, configs) in experiment_configs(experiment, params)? {
        let mut files = Vec::with_capacity(configs.len());
        for mut cfg in configs {
            cfg.units = units.to_vec();
            files.push(generate_file(out_dir, &cfg, picker)?);
        }
        out.push(KindFiles { kind, files });
    }
    Ok(out)
}

/// Run `tool` on every file `replicates` times and average per file.
///
/// A failed invocation marks that file as failed and the loop moves on; a
/// failed file is not retried in later replicates.
///
/// # Errors
/// `InvalidConfiguration` when `replicates` is zero.
pub fn perform_experiment(
    files: &[KindFiles],
    tool: &dyn InferenceTool,
    replicates: u32,
) -> Result<Vec<KindResults>, UnitBenchError> {
    if replicates == 0 {
        return Err(UnitBenchError::invalid("replicates must be at least 1"));
    }
    // per kind, per file: running sum or the first failure
    let mut sums: Vec<Vec<Result<u64, String>>> =
        files.iter().map(|k| vec![Ok(0); k.files.len()]).collect();
    for replicate in 0..replicates {
        for (kind, kind_sums) in files.iter().zip(sums.iter_mut()) {
            for (f, slot) in kind.files.iter().zip(kind_sums.iter_mut()) {
                let Ok(&total) = slot.as_ref() else { continue };
                *slot = match tool.solve_time(f) {
                    Ok(ms) => {
                        log::info!(
                            target: METRICS_TARGET,
                            "kind={} file={} replicate={} solve_ms={ms}",
                            kind.kind.name(),
                            f.display(),
                            replicate + 1
                        );
                        total.checked_add(ms).ok_or_else(|| {
                            log::warn!("solve time total overflowed for {}", f.display());
                            format!("solve time total overflowed after {ms} ms")
                        })
                    }
                    Err(e) => {
                        log::warn!("no statistic for {}: {e}", f.display());
                        Err(e.to_string())
                    }
                };
            }
        }
    }
    Ok(files
        .iter()
        .zip(sums)
        .map(|(kind, kind_sums)| KindResults {
            kind: kind.kind,
            files: kind
                .files
                .iter()
                .zip(kind_sums)
                .map(|(f, sum)| FileResult {
                    path: f.clone(),
                    measurement: match sum {
                        Ok(sum) => Measurement::Measured { solve_ms: truncated_mean(sum, replicates) },
                        Err(reason) => Measurement::Failed { reason },
                    },
                })
                .collect(),
        })
        .collect())
}
