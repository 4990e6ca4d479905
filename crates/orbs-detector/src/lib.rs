//! Breakout detection for the ORB strategy.
//!
//! Consumes post-window ticks for a finalized opening range and emits
//! breakout events under a configurable confirmation policy. A re-arm
//! latch keeps boundary chop from producing alert storms: once a
//! direction fires it stays quiet until price retraces into the band.

pub mod config;
pub mod detector;
pub mod error;
pub mod event;

pub use config::DetectorConfig;
pub use detector::BreakoutDetector;
pub use error::{DetectorError, DetectorResult};
pub use event::BreakoutEvent;
