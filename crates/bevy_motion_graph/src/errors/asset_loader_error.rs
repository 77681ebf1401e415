use thiserror::Error;

use super::GraphFormatError;

/// Possible errors that can be produced by a custom asset loader
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AssetLoaderError {
    /// An [IO](std::io) Error
    #[error("could not read asset: {0}")]
    Io(#[from] std::io::Error),
    /// A [RON](ron) Error
    #[error("could not parse RON: {0}")]
    RonSpannedError(#[from] ron::error::SpannedError),
    #[error("could not parse graph file: {0}")]
    Format(#[from] GraphFormatError),
}
