//! Core domain types for the ORB breakout engine.
//!
//! This crate provides fundamental types used throughout the engine:
//! - `Instrument`: Identifier for a tracked symbol
//! - `Price`, `Qty`: Precision-safe numeric types
//! - `PriceTick`: A validated, immutable price observation
//! - `Direction`: Breakout/position direction

pub mod decimal;
pub mod error;
pub mod tick;
pub mod types;

pub use decimal::{Price, Qty};
pub use error::{CoreError, Result};
pub use tick::PriceTick;
pub use types::{Direction, Instrument, SessionDate};
