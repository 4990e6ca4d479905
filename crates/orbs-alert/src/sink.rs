//! Alert sink trait and the built-in log sink.

use crate::event::AlertEvent;
use tracing::info;

/// Destination for engine notifications.
///
/// Implementations must be cheap or internally buffered: the dispatcher
/// calls sinks sequentially and a slow sink delays later notifications
/// (though never tick processing). Discord/email senders live outside
/// the core behind this trait.
pub trait AlertSink: Send + Sync {
    /// Sink name for logging.
    fn name(&self) -> &str;

    /// Deliver one notification.
    fn deliver(&self, event: &AlertEvent);
}

/// Sink that writes notifications to the structured log.
#[derive(Debug, Default)]
pub struct LogSink;

impl AlertSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn deliver(&self, event: &AlertEvent) {
        info!(title = %event.title(), body = %event.body(), "Alert");
    }
}
