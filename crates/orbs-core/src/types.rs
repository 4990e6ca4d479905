//! Instrument and direction types.

use crate::error::{CoreError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar date identifying a trading session.
pub type SessionDate = chrono::NaiveDate;

/// Identifier for a tracked instrument (e.g., "SPY", "QQQ").
///
/// Symbols are stored uppercased so that feed adapters with differing
/// conventions map to the same pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instrument(String);

impl Instrument {
    /// Create a new instrument from a symbol string.
    ///
    /// Fails on empty or whitespace-only symbols.
    pub fn new(symbol: impl AsRef<str>) -> Result<Self> {
        let symbol = symbol.as_ref().trim();
        if symbol.is_empty() {
            return Err(CoreError::InvalidInstrument(
                "symbol must not be empty".to_string(),
            ));
        }
        Ok(Self(symbol.to_uppercase()))
    }

    /// The normalized symbol.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Instrument {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Breakout/position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Price broke above the opening range high.
    Up,
    /// Price broke below the opening range low.
    Down,
}

impl Direction {
    /// Sign applied to (exit - entry) when computing realized PnL.
    #[must_use]
    pub fn sign(&self) -> Decimal {
        match self {
            Self::Up => Decimal::ONE,
            Self::Down => Decimal::NEGATIVE_ONE,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}
