//! Per-(instrument, session-date) processing pipeline.

use crate::error::EngineResult;
use chrono::{DateTime, Utc};
use orbs_alert::{AlertEvent, AlertSender};
use orbs_core::PriceTick;
use orbs_detector::{BreakoutDetector, DetectorConfig};
use orbs_range::{OpeningRangeTracker, RangeError, RangeStatus, TickOutcome};
use orbs_risk::{PositionStatus, RiskConfig, RiskManager};
use orbs_session::TradingSession;
use orbs_telemetry::SessionStats;
use tracing::{debug, warn};

/// Result of handing one tick to a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Tick was handled; the session is still live.
    Continue,
    /// The session close has passed; the pipeline ran its teardown and
    /// must be dropped by the caller.
    SessionOver,
}

/// One session's worth of range tracking, breakout detection, and risk
/// management, wired to the alert queue.
///
/// Ticks arrive strictly in timestamp order (the worker drops regressions
/// before they reach here). The detector exists only once the opening
/// range is finalized with data; an empty window leaves the pipeline
/// inert for the rest of the session.
pub struct SessionPipeline {
    session: TradingSession,
    tracker: OpeningRangeTracker,
    detector: Option<BreakoutDetector>,
    risk: RiskManager,
    alerts: AlertSender,
    stats: SessionStats,
    detector_config: DetectorConfig,
    /// Set once the window elapsed without data; no detection this session.
    range_invalid: bool,
}

impl SessionPipeline {
    pub fn new(
        session: TradingSession,
        detector_config: DetectorConfig,
        risk_config: RiskConfig,
        alerts: AlertSender,
    ) -> EngineResult<Self> {
        let tracker = OpeningRangeTracker::new(&session);
        let risk = RiskManager::new(risk_config)?;
        Ok(Self {
            session,
            tracker,
            detector: None,
            risk,
            alerts,
            stats: SessionStats::new(),
            detector_config,
            range_invalid: false,
        })
    }

    /// The session this pipeline is bound to.
    #[must_use]
    pub fn session(&self) -> &TradingSession {
        &self.session
    }

    /// Accumulated counters, for worker-level bookkeeping.
    pub fn stats_mut(&mut self) -> &mut SessionStats {
        &mut self.stats
    }

    /// Process one tick for this session.
    pub fn on_tick(&mut self, tick: &PriceTick) -> PipelineOutcome {
        if self.session.after_close(tick.timestamp) {
            debug!(
                instrument = %tick.instrument,
                tick_ts = %tick.timestamp,
                close = %self.session.close,
                "Tick at or past session close; ending session"
            );
            self.end_session(self.session.close);
            return PipelineOutcome::SessionOver;
        }

        // The tracker also gates ticks timestamped inside the window (or
        // before it) after a wall-clock flush already finalized the
        // range: those are rejected as late, never fed to detection.
        let range_pending = self.detector.is_none() && !self.range_invalid;
        if range_pending || !self.session.after_window(tick.timestamp) {
            match self.tracker.apply(tick) {
                Ok(TickOutcome::Absorbed) => {
                    self.stats.ticks_processed += 1;
                    return PipelineOutcome::Continue;
                }
                Ok(TickOutcome::WindowClosed) => {
                    // Range finalized by this tick; the tick itself now
                    // flows through detection below.
                    self.handle_finalized_range();
                }
                Err(RangeError::OutOfWindow { .. }) => {
                    debug!(
                        instrument = %tick.instrument,
                        tick_ts = %tick.timestamp,
                        "Premarket tick ignored"
                    );
                    self.stats.ticks_rejected += 1;
                    return PipelineOutcome::Continue;
                }
                Err(e) => {
                    warn!(instrument = %tick.instrument, error = %e, "Tick rejected");
                    self.stats.ticks_rejected += 1;
                    return PipelineOutcome::Continue;
                }
            }
        }

        self.stats.ticks_processed += 1;

        if let Some(detector) = self.detector.as_mut() {
            if let Some(event) = detector.on_tick(tick) {
                self.stats.breakouts_emitted += 1;
                self.alerts.send(AlertEvent::Breakout(event.clone()));
                if self.risk.on_breakout(&event).is_some() {
                    self.stats.positions_opened += 1;
                }
            }
            if let Some(closed) = self.risk.on_tick(tick) {
                self.record_close(closed.status);
                self.alerts.send(AlertEvent::PositionClosed(closed));
            }
        }

        PipelineOutcome::Continue
    }

    /// Finalize the range off the wall clock when no tick arrives at or
    /// past the window end.
    pub fn maybe_flush_window(&mut self, now: DateTime<Utc>) {
        if self.detector.is_some() || self.range_invalid {
            return;
        }
        if self.session.after_window(now) {
            self.tracker.finalize();
            self.handle_finalized_range();
        }
    }

    /// Tear the session down: finalize anything still pending, force-close
    /// any open position, and log the summary.
    pub fn end_session(&mut self, close_time: DateTime<Utc>) {
        if self.detector.is_none() && !self.range_invalid {
            self.tracker.finalize();
            self.handle_finalized_range();
        }

        if let Some(closed) = self.risk.on_session_end(close_time) {
            self.record_close(closed.status);
            self.alerts.send(AlertEvent::PositionClosed(closed));
        }

        self.stats.summarize(
            self.session.instrument.symbol(),
            &self.session.date.to_string(),
        );
    }

    fn handle_finalized_range(&mut self) {
        let range = self.tracker.range().clone();
        match range.status {
            RangeStatus::Finalized => {
                self.alerts.send(AlertEvent::RangeFinalized(range.clone()));
                // Config was validated at startup and the range is
                // Finalized, so this cannot fail in practice.
                match BreakoutDetector::new(self.detector_config, range) {
                    Ok(detector) => self.detector = Some(detector),
                    Err(e) => {
                        warn!(
                            instrument = %self.session.instrument,
                            error = %e,
                            "Failed to build breakout detector"
                        );
                        self.range_invalid = true;
                    }
                }
            }
            RangeStatus::Invalid => {
                self.range_invalid = true;
                self.alerts.send(AlertEvent::RangeInvalid {
                    instrument: self.session.instrument.clone(),
                    session_date: self.session.date,
                });
            }
            RangeStatus::Forming => {}
        }
    }

    fn record_close(&mut self, status: PositionStatus) {
        match status {
            PositionStatus::ClosedStop => self.stats.closed_stop += 1,
            PositionStatus::ClosedTarget => self.stats.closed_target += 1,
            PositionStatus::ClosedSessionEnd => self.stats.closed_session_end += 1,
            PositionStatus::Open => {}
        }
    }
}
