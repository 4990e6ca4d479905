//! Opening range tracker state machine.

use crate::error::{RangeError, RangeResult};
use crate::range::{OpeningRange, RangeStatus};
use orbs_core::PriceTick;
use orbs_session::TradingSession;
use tracing::{info, warn};

/// What happened to a tick handed to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick fell inside the opening window and was absorbed into the range.
    Absorbed,
    /// Tick is timestamped at or past `window_end`. The range was
    /// finalized (if it was not already) and the tick was NOT consumed;
    /// the caller must forward it downstream.
    WindowClosed,
}

/// Per-(instrument, session-date) opening range state machine.
///
/// States: Forming -> Finalized (ticks seen) or Forming -> Invalid
/// (window elapsed empty). Both terminal states are immutable.
#[derive(Debug)]
pub struct OpeningRangeTracker {
    range: OpeningRange,
}

impl OpeningRangeTracker {
    /// Create a tracker for a resolved session.
    #[must_use]
    pub fn new(session: &TradingSession) -> Self {
        Self {
            range: OpeningRange {
                instrument: session.instrument.clone(),
                session_date: session.date,
                window_start: session.window_start,
                window_end: session.window_end,
                high: orbs_core::Price::ZERO,
                low: orbs_core::Price::ZERO,
                tick_count: 0,
                status: RangeStatus::Forming,
            },
        }
    }

    /// Current range snapshot.
    #[must_use]
    pub fn range(&self) -> &OpeningRange {
        &self.range
    }

    /// Apply a tick.
    ///
    /// - before `window_start`: rejected with `OutOfWindow` (non-fatal)
    /// - inside the window while Forming: absorbed into high/low
    /// - inside the window after finalization: rejected with `LateTick`;
    ///   nothing reopens the range
    /// - at/past `window_end`: finalizes first, then reports the tick as
    ///   unconsumed so the caller forwards it to breakout detection
    pub fn apply(&mut self, tick: &PriceTick) -> RangeResult<TickOutcome> {
        if tick.instrument != self.range.instrument {
            return Err(RangeError::InstrumentMismatch {
                expected: self.range.instrument.to_string(),
                got: tick.instrument.to_string(),
            });
        }

        if tick.timestamp < self.range.window_start {
            return Err(RangeError::OutOfWindow {
                tick_ts: tick.timestamp,
                window_start: self.range.window_start,
            });
        }

        if tick.timestamp >= self.range.window_end {
            self.finalize();
            return Ok(TickOutcome::WindowClosed);
        }

        // In-window timestamp from here on.
        if self.range.status != RangeStatus::Forming {
            return Err(RangeError::LateTick {
                tick_ts: tick.timestamp,
            });
        }

        if self.range.tick_count == 0 {
            self.range.high = tick.price;
            self.range.low = tick.price;
        } else {
            self.range.high = self.range.high.max(tick.price);
            self.range.low = self.range.low.min(tick.price);
        }
        self.range.tick_count += 1;

        Ok(TickOutcome::Absorbed)
    }

    /// Finalize the range.
    ///
    /// Idempotent: the first call transitions Forming to Finalized (or
    /// Invalid when no tick was seen); later calls are no-ops. Covers the
    /// case of no further ticks arriving after the window.
    pub fn finalize(&mut self) -> &OpeningRange {
        if self.range.status != RangeStatus::Forming {
            return &self.range;
        }

        if self.range.tick_count == 0 {
            self.range.status = RangeStatus::Invalid;
            warn!(
                instrument = %self.range.instrument,
                session_date = %self.range.session_date,
                "Opening window elapsed without data; range invalid"
            );
        } else {
            self.range.status = RangeStatus::Finalized;
            info!(
                instrument = %self.range.instrument,
                session_date = %self.range.session_date,
                high = %self.range.high,
                low = %self.range.low,
                height = %self.range.height(),
                tick_count = self.range.tick_count,
                "Opening range finalized"
            );
        }

        &self.range
    }
}
