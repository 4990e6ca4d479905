//! Breakout event type.

use chrono::{DateTime, NaiveDate, Utc};
use orbs_core::{Direction, Instrument, Price};
use orbs_range::OpeningRange;
use serde::{Deserialize, Serialize};

/// A confirmed breakout of the opening range.
///
/// Immutable once created. `trigger_price` is the price of the tick that
/// completed confirmation, not the first candidate tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakoutEvent {
    pub instrument: Instrument,
    pub session_date: NaiveDate,
    pub direction: Direction,
    pub trigger_price: Price,
    pub timestamp: DateTime<Utc>,
    /// The finalized range the breakout was measured against.
    pub range: OpeningRange,
    /// Identifier for downstream correlation (alerting, logs).
    pub event_id: String,
}

impl BreakoutEvent {
    pub(crate) fn new(
        direction: Direction,
        trigger_price: Price,
        timestamp: DateTime<Utc>,
        range: OpeningRange,
    ) -> Self {
        let event_id = format!(
            "orb_{}_{}_{}_{}",
            range.instrument,
            range.session_date,
            direction,
            timestamp.timestamp_millis()
        );
        Self {
            instrument: range.instrument.clone(),
            session_date: range.session_date,
            direction,
            trigger_price,
            timestamp,
            range,
            event_id,
        }
    }

    /// The boundary that was broken (high for Up, low for Down).
    #[must_use]
    pub fn broken_level(&self) -> Price {
        match self.direction {
            Direction::Up => self.range.high,
            Direction::Down => self.range.low,
        }
    }
}
