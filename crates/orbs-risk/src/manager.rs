//! Risk manager: breakout entry and exit handling.

use crate::config::RiskConfig;
use crate::error::RiskResult;
use crate::position::{Position, PositionStatus};
use chrono::{DateTime, Utc};
use orbs_core::{Direction, Price, PriceTick};
use orbs_detector::BreakoutEvent;
use tracing::{debug, info};

/// Per-(instrument, session-date) position manager.
///
/// Opens a position on the first breakout of the session, then watches
/// ticks for stop-loss/take-profit and force-closes at session end.
/// Subsequent breakouts while a position is open are recorded but do not
/// compound exposure.
///
/// Exit-price convention: stop/target exits settle at the threshold
/// level; session-end exits settle at the last observed price.
#[derive(Debug)]
pub struct RiskManager {
    config: RiskConfig,
    position: Option<Position>,
    closed: Vec<Position>,
    /// Breakouts ignored because a position was already open.
    skipped_breakouts: u64,
    /// Most recent post-window price, used to mark session-end closes.
    last_price: Option<Price>,
}

impl RiskManager {
    /// Create a manager; validates the configuration up front.
    pub fn new(config: RiskConfig) -> RiskResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            position: None,
            closed: Vec::new(),
            skipped_breakouts: 0,
            last_price: None,
        })
    }

    /// The currently open position, if any.
    #[must_use]
    pub fn open_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Positions closed this session, in close order.
    #[must_use]
    pub fn closed_positions(&self) -> &[Position] {
        &self.closed
    }

    /// Breakout events that did not open a position.
    #[must_use]
    pub fn skipped_breakouts(&self) -> u64 {
        self.skipped_breakouts
    }

    /// Handle a confirmed breakout.
    ///
    /// Opens a position unless one is already open for this session.
    /// Returns the opened position, if any.
    pub fn on_breakout(&mut self, event: &BreakoutEvent) -> Option<&Position> {
        if self.position.is_some() {
            self.skipped_breakouts += 1;
            debug!(
                event_id = %event.event_id,
                instrument = %event.instrument,
                direction = %event.direction,
                "Breakout ignored; position already open this session"
            );
            return None;
        }

        let height = event.range.height().inner();
        let entry = event.trigger_price;
        let (stop_loss, take_profit) = match event.direction {
            Direction::Up => (
                Price::new(entry.inner() - self.config.stop_multiplier * height),
                Price::new(entry.inner() + self.config.target_multiplier * height),
            ),
            Direction::Down => (
                Price::new(entry.inner() + self.config.stop_multiplier * height),
                Price::new(entry.inner() - self.config.target_multiplier * height),
            ),
        };

        let position = Position {
            instrument: event.instrument.clone(),
            session_date: event.session_date,
            direction: event.direction,
            entry_price: entry,
            stop_loss,
            take_profit,
            opened_at: event.timestamp,
            status: PositionStatus::Open,
            closed_at: None,
            realized_pnl: None,
        };

        info!(
            instrument = %position.instrument,
            session_date = %position.session_date,
            direction = %position.direction,
            entry = %position.entry_price,
            stop_loss = %position.stop_loss,
            take_profit = %position.take_profit,
            range_height = %height,
            "Position opened on breakout"
        );

        self.position = Some(position);
        self.position.as_ref()
    }

    /// Handle a post-window tick.
    ///
    /// Returns the position when this tick closed it. Stop-loss takes
    /// precedence over take-profit when one tick crosses both.
    pub fn on_tick(&mut self, tick: &PriceTick) -> Option<Position> {
        self.last_price = Some(tick.price);

        let position = self.position.as_mut()?;
        let (stop_hit, target_hit) = match position.direction {
            Direction::Up => (
                tick.price <= position.stop_loss,
                tick.price >= position.take_profit,
            ),
            Direction::Down => (
                tick.price >= position.stop_loss,
                tick.price <= position.take_profit,
            ),
        };

        let (status, exit_price) = if stop_hit {
            (PositionStatus::ClosedStop, position.stop_loss)
        } else if target_hit {
            (PositionStatus::ClosedTarget, position.take_profit)
        } else {
            return None;
        };

        position.close(status, exit_price, tick.timestamp);
        self.finish_close()
    }

    /// Force-close any open position at session end, marked to the last
    /// observed price (entry price when no post-window tick was seen).
    pub fn on_session_end(&mut self, close_time: DateTime<Utc>) -> Option<Position> {
        let position = self.position.as_mut()?;
        let exit_price = self.last_price.unwrap_or(position.entry_price);
        position.close(PositionStatus::ClosedSessionEnd, exit_price, close_time);
        self.finish_close()
    }

    fn finish_close(&mut self) -> Option<Position> {
        let position = self.position.take()?;
        info!(
            instrument = %position.instrument,
            session_date = %position.session_date,
            direction = %position.direction,
            status = ?position.status,
            entry = %position.entry_price,
            pnl = %position.realized_pnl.unwrap_or_default(),
            "Position closed"
        );
        self.closed.push(position.clone());
        Some(position)
    }
}
