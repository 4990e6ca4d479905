//! Engine facade: tick routing and lifecycle.

use crate::config::AppConfig;
use crate::error::EngineResult;
use crate::worker::InstrumentWorker;
use chrono::Duration;
use dashmap::DashMap;
use orbs_alert::{spawn_dispatcher, AlertSender, AlertSink};
use orbs_core::{Instrument, PriceTick};
use orbs_session::{SessionClock, WeekdayCalendar};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Top-level engine: one worker task per instrument plus a shared alert
/// dispatcher.
///
/// `on_tick` is the single ingestion point; instruments are discovered on
/// first sight and their workers spawned lazily. Dropping ticks never
/// happens here — the per-instrument queue applies backpressure to the
/// feed instead.
pub struct Engine {
    config: AppConfig,
    clock: Arc<SessionClock>,
    alerts: AlertSender,
    workers: DashMap<Instrument, mpsc::Sender<PriceTick>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    dispatcher: JoinHandle<()>,
}

impl Engine {
    /// Build the engine and spawn the alert dispatcher.
    ///
    /// Must be called inside a tokio runtime. Validates the configuration
    /// up front so worker spawns cannot fail later.
    pub fn new(config: AppConfig, sinks: Vec<Arc<dyn AlertSink>>) -> EngineResult<Self> {
        config.validate()?;

        let calendar = WeekdayCalendar::new(config.session.open, config.session.close)
            .with_holidays(config.session.holidays.iter().copied());
        let clock = Arc::new(SessionClock::new(
            Arc::new(calendar),
            Duration::minutes(config.session.opening_window_minutes),
        )?);

        let (alerts, dispatcher) = spawn_dispatcher(sinks, config.engine.alert_queue_capacity);

        info!(
            session_open = %config.session.open,
            session_close = %config.session.close,
            opening_window_minutes = config.session.opening_window_minutes,
            confirmation_ticks = config.detector.confirmation_ticks,
            "Engine started"
        );

        Ok(Self {
            config,
            clock,
            alerts,
            workers: DashMap::new(),
            handles: Mutex::new(Vec::new()),
            dispatcher,
        })
    }

    /// Route a tick to its instrument's worker, spawning one on first
    /// sight of the instrument. Awaits queue space rather than dropping.
    pub async fn on_tick(&self, tick: PriceTick) {
        let tx = self
            .workers
            .entry(tick.instrument.clone())
            .or_insert_with(|| self.spawn_worker(tick.instrument.clone()))
            .clone();

        if tx.send(tick).await.is_err() {
            // Worker only exits when its sender side is closed, so this
            // indicates shutdown raced with ingestion.
            warn!("Tick dropped; worker already stopped");
        }
    }

    /// Number of instruments with a live worker.
    #[must_use]
    pub fn instrument_count(&self) -> usize {
        self.workers.len()
    }

    fn spawn_worker(&self, instrument: Instrument) -> mpsc::Sender<PriceTick> {
        info!(instrument = %instrument, "Spawning worker for new instrument");
        let (tx, rx) = mpsc::channel(self.config.engine.tick_queue_capacity);
        let worker = InstrumentWorker::new(
            instrument,
            rx,
            self.clock.clone(),
            self.config.clone(),
            self.alerts.clone(),
        );
        self.handles.lock().push(tokio::spawn(worker.run()));
        tx
    }

    /// Graceful shutdown: stop ingestion, drain every worker, then drain
    /// the alert queue.
    pub async fn shutdown(self) {
        info!("Engine shutting down");
        self.workers.clear();

        let handles = self.handles.into_inner();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Worker task panicked during shutdown");
            }
        }

        // Workers are gone; dropping our sender lets the dispatcher drain
        // and terminate.
        drop(self.alerts);
        if let Err(e) = self.dispatcher.await {
            warn!(error = %e, "Alert dispatcher panicked during shutdown");
        }
        info!("Engine stopped");
    }
}
