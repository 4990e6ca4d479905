//! Opening range snapshot type.

use chrono::{DateTime, NaiveDate, Utc};
use orbs_core::{Instrument, Price};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an opening range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeStatus {
    /// Accumulating ticks inside the opening window.
    Forming,
    /// Window closed with at least one tick; high/low are immutable.
    Finalized,
    /// Window closed with no ticks; no breakout is possible downstream.
    Invalid,
}

/// The high/low band established during the opening window.
///
/// Owned by the tracker while Forming; read-only once Finalized.
/// When `tick_count > 0`, `high >= low` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningRange {
    pub instrument: Instrument,
    pub session_date: NaiveDate,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub high: Price,
    pub low: Price,
    pub tick_count: u64,
    pub status: RangeStatus,
}

impl OpeningRange {
    /// Band height (`high - low`). Zero until the first tick.
    #[must_use]
    pub fn height(&self) -> Price {
        self.high - self.low
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.status == RangeStatus::Finalized
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.status == RangeStatus::Invalid
    }

    /// Whether a price sits inside the band (edges inclusive).
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        price >= self.low && price <= self.high
    }
}
