//! Experiment driver: generate a sweep of artifacts, run the inference tool
//! on each, and average the reported solve time across replicates.

mod experiment;
mod inference;
mod report;

pub use experiment::{
    Experiment, KindFiles, OpKind, SweepParams, experiment_configs, generate_experiment,
    perform_experiment,
};
pub use inference::{InferenceTool, ScriptTool, StatisticSource, parse_statistic};
pub use report::{ExperimentReport, FileResult, KindResults, Measurement};
