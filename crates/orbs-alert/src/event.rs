//! Alert event payloads and human-readable formatting.

use chrono::NaiveDate;
use orbs_core::Instrument;
use orbs_detector::BreakoutEvent;
use orbs_range::OpeningRange;
use orbs_risk::{Position, PositionStatus};
use serde::{Deserialize, Serialize};

/// Notification emitted by the engine, delivered in occurrence order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AlertEvent {
    /// Opening range finalized for a session.
    RangeFinalized(OpeningRange),
    /// Opening window elapsed without data; the session is inert.
    /// A notice, not an error.
    RangeInvalid {
        instrument: Instrument,
        session_date: NaiveDate,
    },
    /// Confirmed breakout of the opening range.
    Breakout(BreakoutEvent),
    /// Position reached a terminal state.
    PositionClosed(Position),
}

impl AlertEvent {
    /// Short subject line for the notification.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::RangeFinalized(range) => {
                format!("{} opening range set", range.instrument)
            }
            Self::RangeInvalid { instrument, .. } => {
                format!("{instrument} opening range unavailable")
            }
            Self::Breakout(event) => {
                format!("{} {} breakout", event.instrument, event.direction)
            }
            Self::PositionClosed(position) => {
                format!("{} position closed", position.instrument)
            }
        }
    }

    /// Multi-line message body.
    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Self::RangeFinalized(range) => format!(
                "Opening range for {} on {}\n\
                 High: {}\nLow: {}\nHeight: {}\nWindow: {} - {}",
                range.instrument,
                range.session_date,
                range.high,
                range.low,
                range.height(),
                range.window_start.format("%H:%M"),
                range.window_end.format("%H:%M"),
            ),
            Self::RangeInvalid {
                instrument,
                session_date,
            } => format!(
                "No data arrived during the opening window for {instrument} on \
                 {session_date}; no breakout signals will fire this session."
            ),
            Self::Breakout(event) => format!(
                "{} broke {} the opening range on {}\n\
                 Trigger: {}\nBroken level: {}\nRange: {} - {}\nTime: {}",
                event.instrument,
                match event.direction {
                    orbs_core::Direction::Up => "above",
                    orbs_core::Direction::Down => "below",
                },
                event.session_date,
                event.trigger_price,
                event.broken_level(),
                event.range.low,
                event.range.high,
                event.timestamp.format("%H:%M:%S"),
            ),
            Self::PositionClosed(position) => format!(
                "{} {} position closed ({})\n\
                 Entry: {}\nStop: {}\nTarget: {}\nPnL: {}",
                position.instrument,
                position.direction,
                match position.status {
                    PositionStatus::ClosedStop => "stop-loss",
                    PositionStatus::ClosedTarget => "take-profit",
                    PositionStatus::ClosedSessionEnd => "session end",
                    PositionStatus::Open => "open",
                },
                position.entry_price,
                position.stop_loss,
                position.take_profit,
                position
                    .realized_pnl
                    .map_or_else(|| "n/a".to_string(), |p| p.to_string()),
            ),
        }
    }
}
