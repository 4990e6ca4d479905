//! Per-session processing counters.

use tracing::info;

/// Counters accumulated by one (instrument, session-date) pipeline and
/// summarized at teardown.
#[derive(Debug, Default, Clone)]
pub struct SessionStats {
    pub ticks_processed: u64,
    pub ticks_rejected: u64,
    pub ticks_out_of_order: u64,
    pub breakouts_emitted: u64,
    pub positions_opened: u64,
    pub closed_stop: u64,
    pub closed_target: u64,
    pub closed_session_end: u64,
}

impl SessionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log the end-of-session summary.
    pub fn summarize(&self, instrument: &str, session_date: &str) {
        info!(
            instrument,
            session_date,
            ticks_processed = self.ticks_processed,
            ticks_rejected = self.ticks_rejected,
            ticks_out_of_order = self.ticks_out_of_order,
            breakouts_emitted = self.breakouts_emitted,
            positions_opened = self.positions_opened,
            closed_stop = self.closed_stop,
            closed_target = self.closed_target,
            closed_session_end = self.closed_session_end,
            "Session summary"
        );
    }
}
