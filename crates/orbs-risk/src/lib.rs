//! Position lifecycle and risk management.
//!
//! On a confirmed breakout, opens a simulated position with stop-loss
//! and take-profit derived from the opening range height, then watches
//! subsequent ticks for exit conditions. One open position per
//! (instrument, session-date); nothing carries into the next session.

pub mod config;
pub mod error;
pub mod manager;
pub mod position;

pub use config::RiskConfig;
pub use error::{RiskError, RiskResult};
pub use manager::RiskManager;
pub use position::{Position, PositionStatus};
