//! Async alert dispatch.

use crate::event::AlertEvent;
use crate::sink::AlertSink;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Sending half handed to the engine pipelines.
#[derive(Clone)]
pub struct AlertSender {
    tx: mpsc::Sender<AlertEvent>,
}

impl AlertSender {
    /// Enqueue a notification without blocking the caller.
    ///
    /// Drops the event (with a warning) when the queue is full rather
    /// than stalling tick processing.
    pub fn send(&self, event: AlertEvent) {
        if let Err(e) = self.tx.try_send(event) {
            warn!(error = %e, "Alert queue full; notification dropped");
        }
    }
}

/// Dispatcher task draining the alert queue and fanning out to sinks.
///
/// Notifications are delivered in the order they occur. The task ends
/// when all senders are dropped.
pub struct AlertDispatcher {
    rx: mpsc::Receiver<AlertEvent>,
    sinks: Vec<Arc<dyn AlertSink>>,
}

impl AlertDispatcher {
    pub async fn run(mut self) {
        debug!(sinks = self.sinks.len(), "Alert dispatcher started");

        while let Some(event) = self.rx.recv().await {
            for sink in &self.sinks {
                sink.deliver(&event);
            }
        }

        debug!("Alert dispatcher terminated");
    }
}

/// Spawn a dispatcher over the given sinks.
///
/// Returns the sender used by pipelines and the task handle for
/// shutdown joins.
pub fn spawn_dispatcher(
    sinks: Vec<Arc<dyn AlertSink>>,
    capacity: usize,
) -> (AlertSender, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(capacity);
    let dispatcher = AlertDispatcher { rx, sinks };
    let handle = tokio::spawn(dispatcher.run());
    (AlertSender { tx }, handle)
}
