//! Alert sink abstraction and async dispatch.
//!
//! The engine core never talks to Discord, email, or any other channel
//! directly: it pushes [`AlertEvent`]s into a bounded queue and a
//! dispatcher task fans them out to registered [`AlertSink`]s in order.
//! A slow sink therefore cannot stall range or breakout computation.

pub mod dispatcher;
pub mod event;
pub mod sink;

pub use dispatcher::{spawn_dispatcher, AlertDispatcher, AlertSender};
pub use event::AlertEvent;
pub use sink::{AlertSink, LogSink};
