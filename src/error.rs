//! Error type shared by every sampler component.

use thiserror::Error;

/// Errors raised while building or advancing a chain.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SamplerError {
    /// A vector or matrix had the wrong shape, or a setting was out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A covariance could not be factorized or a density was not a finite,
    /// non-negative number.
    #[error("numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    /// Failure reported by a user supplied distribution.
    #[error("density evaluation failed")]
    Distribution(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "csv")]
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SamplerError>;

impl SamplerError {
    /// Wraps a failure raised inside [`Distribution::eval`](crate::distributions::Distribution::eval).
    pub fn distribution(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Distribution(err.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        Self::NumericalDegeneracy(msg.into())
    }
}
