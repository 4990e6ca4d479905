//! Engine error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(#[from] orbs_session::SessionError),

    #[error("Detector error: {0}")]
    Detector(#[from] orbs_detector::DetectorError),

    #[error("Risk error: {0}")]
    Risk(#[from] orbs_risk::RiskError),
}

pub type EngineResult<T> = Result<T, EngineError>;
