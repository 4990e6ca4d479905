//! Position type.

use chrono::{DateTime, NaiveDate, Utc};
use orbs_core::{Direction, Instrument, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionStatus {
    /// Entered on a breakout; watching ticks for an exit.
    Open,
    /// Stop-loss crossed against the position.
    ClosedStop,
    /// Take-profit crossed in favor.
    ClosedTarget,
    /// Session close reached while still open; marked to last price.
    ClosedSessionEnd,
}

impl PositionStatus {
    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self != Self::Open
    }
}

/// A simulated position opened on a breakout event.
///
/// Owned by the risk manager from creation to closure. Exactly one open
/// position per (instrument, session-date) at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub instrument: Instrument,
    pub session_date: NaiveDate,
    pub direction: Direction,
    pub entry_price: Price,
    pub stop_loss: Price,
    pub take_profit: Price,
    pub opened_at: DateTime<Utc>,
    pub status: PositionStatus,
    pub closed_at: Option<DateTime<Utc>>,
    /// `(exit - entry) * direction_sign`; set on close.
    pub realized_pnl: Option<Decimal>,
}

impl Position {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PositionStatus::Open
    }

    /// Record the exit. Called exactly once by the risk manager.
    pub(crate) fn close(
        &mut self,
        status: PositionStatus,
        exit_price: Price,
        closed_at: DateTime<Utc>,
    ) {
        debug_assert!(self.is_open(), "position closed twice");
        self.status = status;
        self.closed_at = Some(closed_at);
        self.realized_pnl =
            Some((exit_price.inner() - self.entry_price.inner()) * self.direction.sign());
    }
}
