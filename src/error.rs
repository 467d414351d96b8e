//! Error types for the SAT art library

use thiserror::Error;

/// Errors raised while building formulas and rendering them
#[derive(Debug, Error)]
pub enum SatArtError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("line {line}: {reason}: {text:?}")]
    Parse {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("resource limit exceeded: {0}")]
    ResourceLimit(String),

    #[error("arithmetic domain error: {0}")]
    Arithmetic(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SatArtError>;
