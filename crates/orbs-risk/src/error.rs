//! Risk error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    /// Stop/target multipliers must both be strictly positive. Surfaced
    /// at startup; fail fast rather than silently disabling risk controls.
    #[error("Invalid risk parameters: {0}")]
    InvalidRiskParameters(String),
}

pub type RiskResult<T> = Result<T, RiskError>;
