//! Trading calendar and session window resolution.
//!
//! Resolves, for a given instrument and calendar date, the regular-session
//! open/close timestamps and the opening-range window boundaries. The
//! calendar itself is pluggable; `WeekdayCalendar` covers the common
//! Monday-Friday market with a fixed UTC session and a holiday list.

pub mod calendar;
pub mod clock;
pub mod error;

pub use calendar::{TradingCalendar, WeekdayCalendar};
pub use clock::{SessionClock, TradingSession, DEFAULT_OPENING_WINDOW_MINUTES};
pub use error::{SessionError, SessionResult};
