use std::path::PathBuf;

use thiserror::Error;

/// Failures while interpreting the command-line path.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Invalid path specified: {}", .0.display())]
    Invalid(PathBuf),

    #[error("Bag filename had no associated results files: {}", .0.display())]
    NoBagResults(PathBuf),

    #[error("Directory contains no matching results files: {}", .0.display())]
    NoDirectoryResults(PathBuf),

    #[error("listing {}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
