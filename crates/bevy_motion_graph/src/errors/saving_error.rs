use thiserror::Error;

/// Possible errors when persisting a graph to disk.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SavingError {
    #[error("could not write graph file: {0}")]
    Io(#[from] std::io::Error),
}
