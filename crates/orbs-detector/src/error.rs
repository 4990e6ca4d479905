//! Detector error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectorError {
    /// A detector can only be built over a Finalized range. Forming
    /// ranges must never feed breakout computation; Invalid ranges mean
    /// no breakout is possible for the session.
    #[error("Range is not finalized ({status}); breakout detection unavailable")]
    RangeNotFinalized { status: String },

    #[error("Invalid detector configuration: {0}")]
    InvalidConfig(String),
}

pub type DetectorResult<T> = Result<T, DetectorError>;
