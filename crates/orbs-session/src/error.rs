//! Session error types.

use chrono::NaiveDate;
use orbs_core::Instrument;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No trading session for {instrument} on {date}")]
    NoSession {
        instrument: Instrument,
        date: NaiveDate,
    },

    #[error("Invalid session hours: {0}")]
    InvalidSessionHours(String),

    #[error("Invalid opening window: {0}")]
    InvalidOpeningWindow(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
