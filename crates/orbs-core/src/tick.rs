//! Price tick type.

use crate::decimal::{Price, Qty};
use crate::error::{CoreError, Result};
use crate::types::Instrument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single validated price observation from the market-data feed.
///
/// Immutable once constructed. The feed adapter is responsible for
/// delivering ticks in timestamp order per instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTick {
    /// Instrument the observation belongs to.
    pub instrument: Instrument,
    /// Observation timestamp (UTC).
    pub timestamp: DateTime<Utc>,
    /// Observed price. Always positive.
    pub price: Price,
    /// Observed volume. Never negative.
    pub volume: Qty,
}

impl PriceTick {
    /// Create a validated tick.
    ///
    /// Fails when `price` is not strictly positive or `volume` is negative.
    pub fn new(
        instrument: Instrument,
        timestamp: DateTime<Utc>,
        price: Price,
        volume: Qty,
    ) -> Result<Self> {
        if !price.is_positive() {
            return Err(CoreError::InvalidPrice(format!(
                "tick price must be positive, got {price}"
            )));
        }
        if volume.is_negative() {
            return Err(CoreError::InvalidVolume(format!(
                "tick volume must be non-negative, got {volume}"
            )));
        }
        Ok(Self {
            instrument,
            timestamp,
            price,
            volume,
        })
    }
}
