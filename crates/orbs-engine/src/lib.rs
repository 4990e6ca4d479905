//! Opening Range Breakout engine.
//!
//! Orchestrates the per-(instrument, session-date) pipelines:
//! - `SessionClock` gates the opening window
//! - `OpeningRangeTracker` accumulates the range
//! - `BreakoutDetector` confirms breakouts of the finalized band
//! - `RiskManager` runs the position to stop, target, or session end
//!
//! One lightweight worker per instrument processes that instrument's
//! ticks strictly in timestamp order; workers run fully in parallel and
//! share only the trading calendar. Alerts are handed off to an async
//! dispatcher so delivery never stalls tick processing.

pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod worker;

pub use config::{AppConfig, EngineConfig, SessionConfig};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use pipeline::{PipelineOutcome, SessionPipeline};
