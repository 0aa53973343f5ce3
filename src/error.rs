//! Error types for land construction and cell access

use thiserror::Error;

/// Errors raised by [`Land`](crate::simulation::Land) operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandError {
    /// A dimension, probability or pattern was rejected
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A position lies outside `[0, width) x [0, height)`
    #[error("position ({x}, {y}) out of bounds for {width}x{height} land")]
    OutOfBounds {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },
}

impl LandError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        LandError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

pub type LandResult<T> = std::result::Result<T, LandError>;
