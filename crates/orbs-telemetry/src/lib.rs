//! Logging initialization and per-session statistics.

pub mod error;
pub mod logging;
pub mod session_stats;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use session_stats::SessionStats;
