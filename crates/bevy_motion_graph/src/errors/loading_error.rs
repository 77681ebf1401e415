use thiserror::Error;

use super::GraphFormatError;

/// Possible errors when reading a persisted graph from disk.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphLoadError {
    #[error("could not read graph file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Format(#[from] GraphFormatError),
}
