//! Session window resolution.

use crate::calendar::TradingCalendar;
use crate::error::{SessionError, SessionResult};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use dashmap::DashMap;
use orbs_core::Instrument;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Default opening-range window length.
pub const DEFAULT_OPENING_WINDOW_MINUTES: i64 = 30;

/// A resolved trading session for one (instrument, date).
///
/// Produced once per session-date by [`SessionClock`] and consumed
/// read-only by the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingSession {
    pub instrument: Instrument,
    pub date: NaiveDate,
    /// Regular session open (UTC).
    pub open: DateTime<Utc>,
    /// Regular session close (UTC).
    pub close: DateTime<Utc>,
    /// Opening-range window start; equals `open`.
    pub window_start: DateTime<Utc>,
    /// Opening-range window end (exclusive).
    pub window_end: DateTime<Utc>,
}

impl TradingSession {
    /// Whether a timestamp falls inside the opening-range window.
    #[must_use]
    pub fn in_opening_window(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.window_start && ts < self.window_end
    }

    /// Whether a timestamp is at or past the opening-range window end.
    #[must_use]
    pub fn after_window(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.window_end
    }

    /// Whether a timestamp is at or past the session close.
    #[must_use]
    pub fn after_close(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.close
    }
}

/// Resolves and caches session windows.
///
/// Pure function of the supplied trading calendar plus a fixed
/// opening-range duration. The cache is the only shared resource across
/// instrument workers and is read-mostly.
pub struct SessionClock {
    calendar: Arc<dyn TradingCalendar>,
    opening_window: Duration,
    cache: DashMap<(Instrument, NaiveDate), TradingSession>,
}

impl SessionClock {
    /// Create a clock over a calendar with the given opening window.
    ///
    /// Fails when the window is not strictly positive.
    pub fn new(calendar: Arc<dyn TradingCalendar>, opening_window: Duration) -> SessionResult<Self> {
        if opening_window <= Duration::zero() {
            return Err(SessionError::InvalidOpeningWindow(format!(
                "opening window must be positive, got {opening_window}"
            )));
        }
        Ok(Self {
            calendar,
            opening_window,
            cache: DashMap::new(),
        })
    }

    /// Resolve the session window for an instrument on a date.
    ///
    /// Returns `SessionError::NoSession` on weekends/holidays. Successful
    /// lookups are cached per (instrument, date).
    pub fn session_for(
        &self,
        instrument: &Instrument,
        date: NaiveDate,
    ) -> SessionResult<TradingSession> {
        let key = (instrument.clone(), date);
        if let Some(session) = self.cache.get(&key) {
            return Ok(session.clone());
        }

        let (open_time, close_time) =
            self.calendar
                .session_hours(instrument, date)
                .ok_or_else(|| SessionError::NoSession {
                    instrument: instrument.clone(),
                    date,
                })?;

        if open_time >= close_time {
            return Err(SessionError::InvalidSessionHours(format!(
                "open {open_time} is not before close {close_time}"
            )));
        }

        let open = date.and_time(open_time).and_utc();
        let close = date.and_time(close_time).and_utc();
        // A window longer than the session is clamped to the close; the
        // range then simply never sees a post-window tick before teardown.
        let window_end = (open + self.opening_window).min(close);

        let session = TradingSession {
            instrument: instrument.clone(),
            date,
            open,
            close,
            window_start: open,
            window_end,
        };

        debug!(
            instrument = %session.instrument,
            %date,
            open = %session.open,
            close = %session.close,
            window_end = %session.window_end,
            "Resolved trading session"
        );

        self.cache.insert(key, session.clone());
        Ok(session)
    }
}
