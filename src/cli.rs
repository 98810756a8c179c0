use std::path::PathBuf;

use clap::Parser;

/// Plot matching evaluation results
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Matching results file, source bag file, or working directory
    #[arg(value_name = "RESULTS_PATH")]
    pub results_path: PathBuf,

    /// Seed for the silhouette subsampling
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Write the computed figure as JSON to this path instead of opening a window
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}
