//! Range error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RangeError {
    /// Tick timestamped before the opening window started.
    #[error("Tick at {tick_ts} precedes window start {window_start}")]
    OutOfWindow {
        tick_ts: DateTime<Utc>,
        window_start: DateTime<Utc>,
    },

    /// In-window-timestamped tick arriving after finalization.
    /// The range is immutable; the tick is rejected.
    #[error("Late tick at {tick_ts} arrived after range finalization")]
    LateTick { tick_ts: DateTime<Utc> },

    /// Tick for a different instrument routed to this tracker.
    #[error("Tick instrument {got} does not match tracker instrument {expected}")]
    InstrumentMismatch { expected: String, got: String },
}

pub type RangeResult<T> = Result<T, RangeError>;
