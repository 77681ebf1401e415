use thiserror::Error;

/// Input motion sets the graph cannot be seeded from.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphValidationError {
    #[error("motion {label:?} has no frames")]
    EmptyMotion { label: String },
}
