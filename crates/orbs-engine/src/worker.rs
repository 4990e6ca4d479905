//! Per-instrument worker task.

use crate::config::AppConfig;
use crate::pipeline::{PipelineOutcome, SessionPipeline};
use chrono::{DateTime, NaiveDate, Utc};
use orbs_alert::AlertSender;
use orbs_core::{Instrument, PriceTick};
use orbs_session::{SessionClock, SessionError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns all processing for one instrument.
///
/// Drains the instrument's tick queue in arrival order, lazily opens a
/// [`SessionPipeline`] per session-date, and runs a wall-clock timer so
/// window finalization and session teardown happen even when the feed
/// goes quiet. Workers never share mutable state, so instruments proceed
/// fully in parallel.
pub struct InstrumentWorker {
    instrument: Instrument,
    rx: mpsc::Receiver<PriceTick>,
    clock: Arc<SessionClock>,
    config: AppConfig,
    alerts: AlertSender,
    pipeline: Option<SessionPipeline>,
    last_tick_ts: Option<DateTime<Utc>>,
    /// Last date warned about as a non-trading day, to log once per date.
    warned_no_session: Option<NaiveDate>,
    /// Date whose session already ran to teardown. One session per date:
    /// after-hours ticks must not reopen a pipeline.
    last_completed_date: Option<NaiveDate>,
}

impl InstrumentWorker {
    pub fn new(
        instrument: Instrument,
        rx: mpsc::Receiver<PriceTick>,
        clock: Arc<SessionClock>,
        config: AppConfig,
        alerts: AlertSender,
    ) -> Self {
        Self {
            instrument,
            rx,
            clock,
            config,
            alerts,
            pipeline: None,
            last_tick_ts: None,
            warned_no_session: None,
            last_completed_date: None,
        }
    }

    /// Run until the tick channel closes.
    pub async fn run(mut self) {
        info!(instrument = %self.instrument, "Instrument worker started");

        let mut check = tokio::time::interval(Duration::from_millis(
            self.config.engine.check_interval_ms,
        ));
        check.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                maybe_tick = self.rx.recv() => match maybe_tick {
                    Some(tick) => self.handle_tick(tick),
                    None => break,
                },
                _ = check.tick() => self.handle_timer(Utc::now()),
            }
        }

        // Channel closed: clean shutdown. Tear down any live session so
        // open positions are marked closed and the summary is logged.
        if let Some(mut pipeline) = self.pipeline.take() {
            let close = pipeline.session().close;
            pipeline.end_session(close);
        }
        info!(instrument = %self.instrument, "Instrument worker stopped");
    }

    fn handle_tick(&mut self, tick: PriceTick) {
        // Out-of-order timestamps are dropped, not reordered.
        if let Some(last) = self.last_tick_ts {
            if tick.timestamp < last {
                warn!(
                    instrument = %self.instrument,
                    tick_ts = %tick.timestamp,
                    last_ts = %last,
                    "Out-of-order tick dropped"
                );
                if let Some(pipeline) = self.pipeline.as_mut() {
                    pipeline.stats_mut().ticks_out_of_order += 1;
                }
                return;
            }
        }
        self.last_tick_ts = Some(tick.timestamp);

        let date = tick.timestamp.date_naive();

        // Session-date rollover: close the old pipeline before opening
        // the next day's.
        if let Some(pipeline) = self.pipeline.as_mut() {
            if pipeline.session().date != date {
                let old_date = pipeline.session().date;
                let close = pipeline.session().close;
                pipeline.end_session(close);
                self.pipeline = None;
                self.last_completed_date = Some(old_date);
            }
        }

        // This date's session already tore down; after-hours prints do
        // not get a second pipeline.
        if self.pipeline.is_none() && self.last_completed_date == Some(date) {
            debug!(
                instrument = %self.instrument,
                tick_ts = %tick.timestamp,
                "Post-session tick dropped"
            );
            return;
        }

        if self.pipeline.is_none() && !self.open_pipeline(date) {
            return;
        }

        if let Some(pipeline) = self.pipeline.as_mut() {
            if pipeline.on_tick(&tick) == PipelineOutcome::SessionOver {
                self.pipeline = None;
                self.last_completed_date = Some(date);
            }
        }
    }

    /// Wall-clock maintenance: finalize the window or tear the session
    /// down when the clock passes the boundary without a tick doing it.
    fn handle_timer(&mut self, now: DateTime<Utc>) {
        let Some(pipeline) = self.pipeline.as_mut() else {
            return;
        };

        if pipeline.session().after_close(now) {
            debug!(
                instrument = %self.instrument,
                "Session close passed on wall clock; tearing down"
            );
            let date = pipeline.session().date;
            let close = pipeline.session().close;
            pipeline.end_session(close);
            self.pipeline = None;
            self.last_completed_date = Some(date);
            return;
        }

        pipeline.maybe_flush_window(now);
    }

    fn open_pipeline(&mut self, date: NaiveDate) -> bool {
        let session = match self.clock.session_for(&self.instrument, date) {
            Ok(session) => session,
            Err(SessionError::NoSession { .. }) => {
                if self.warned_no_session != Some(date) {
                    warn!(
                        instrument = %self.instrument,
                        %date,
                        "No trading session; dropping ticks for this date"
                    );
                    self.warned_no_session = Some(date);
                }
                return false;
            }
            Err(e) => {
                warn!(instrument = %self.instrument, %date, error = %e, "Session lookup failed");
                return false;
            }
        };

        match SessionPipeline::new(
            session,
            self.config.detector,
            self.config.risk,
            self.alerts.clone(),
        ) {
            Ok(pipeline) => {
                self.pipeline = Some(pipeline);
                true
            }
            Err(e) => {
                warn!(instrument = %self.instrument, error = %e, "Failed to open session pipeline");
                false
            }
        }
    }
}
