//! Opening range tracking.
//!
//! Per-(instrument, session-date) state machine that consumes ticks
//! during the opening window and produces a finalized high/low range.
//! The exact boundary of the first window is the whole strategy's
//! anchor: finalization is idempotent and nothing after `window_end`
//! can widen the range.

pub mod error;
pub mod range;
pub mod tracker;

pub use error::{RangeError, RangeResult};
pub use range::{OpeningRange, RangeStatus};
pub use tracker::{OpeningRangeTracker, TickOutcome};
