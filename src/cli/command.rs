use std::path::PathBuf;

use crate::generator::FileConfig;
use crate::harness::SweepParams;

pub enum Command {
    /// Generate one microbenchmark into `out_dir` (settings' output dir if `None`).
    Generate {
        config: FileConfig,
        out_dir: Option<PathBuf>,
    },
    /// Run the inference tool once on each file and print the statistic.
    Infer {
        files: Vec<PathBuf>,
    },
    /// Generate an experiment sweep, measure it and report.
    Experiment {
        id: u8,
        params: SweepParams,
        csv: Option<PathBuf>,
    },
    /// Print the effective settings.
    ShowConfig,
}
