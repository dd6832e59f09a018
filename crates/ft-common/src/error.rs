//! Error types for flavor-tagging calibration.
//!
//! Shape and domain problems fail fast before any computation starts.
//! Degenerate numerical outcomes (single-class folds, zero-information
//! events) are deliberately *not* errors; they produce valid-but-useless
//! results per the calibration contract.

use thiserror::Error;

/// Result type alias for flavor-tagging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for flavor-tagging calibration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Parallel input arrays disagree in length.
    #[error("input arrays have mismatched lengths: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// An operation that needs data received none.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// A probability fell outside [0, 1].
    #[error("invalid probability value: {0} (must be in [0, 1])")]
    InvalidProbability(f64),

    /// A split fraction fell outside the open interval (0, 1).
    #[error("invalid train fraction: {0} (must be in (0, 1))")]
    InvalidTrainFraction(f64),

    /// Quantile binning could not produce distinct edges at this bin count.
    ///
    /// Recovered internally by decrementing the bin count; surfaces only if
    /// no bin count down to 1 succeeds.
    #[error("quantile binning failed with {bins} bins")]
    BinningFailed { bins: usize },

    /// AUC is undefined because one of the two classes carries no weight.
    #[error("degenerate class balance: both classes need positive weight")]
    DegenerateClasses,
}

impl Error {
    /// Convenience check used by validation helpers.
    pub fn check_same_length(left: usize, right: usize) -> Result<()> {
        if left != right {
            return Err(Error::LengthMismatch { left, right });
        }
        Ok(())
    }
}
