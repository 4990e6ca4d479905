//! Breakout detector implementation.

use crate::config::DetectorConfig;
use crate::error::{DetectorError, DetectorResult};
use crate::event::BreakoutEvent;
use orbs_core::{Direction, PriceTick};
use orbs_range::OpeningRange;
use tracing::info;

/// Per-direction confirmation state.
#[derive(Debug, Clone, Copy)]
struct DirectionArm {
    /// Consecutive breaching ticks seen on this side.
    consecutive: u32,
    /// Eligible to fire. Disarmed after an event until price retraces
    /// into the band.
    armed: bool,
}

impl DirectionArm {
    fn new() -> Self {
        Self {
            consecutive: 0,
            armed: true,
        }
    }

    fn reset_count(&mut self) {
        self.consecutive = 0;
    }

    fn rearm(&mut self) {
        self.consecutive = 0;
        self.armed = true;
    }
}

/// Breakout detector for one (instrument, session-date).
///
/// Built only over a Finalized range, so breakouts can never be computed
/// against a Forming or Invalid one.
///
/// - Up candidate when `price > range.high`; Down when `price < range.low`.
/// - A candidate must persist for `confirmation_ticks` consecutive ticks
///   on the same side; a tick on the opposite side resets that side's
///   counter, and a tick inside the band resets both.
/// - After a direction fires it stays disarmed until price retraces into
///   `[low, high]`. The opposite direction remains eligible throughout.
#[derive(Debug)]
pub struct BreakoutDetector {
    config: DetectorConfig,
    range: OpeningRange,
    up: DirectionArm,
    down: DirectionArm,
}

impl BreakoutDetector {
    /// Create a detector over a finalized range.
    pub fn new(config: DetectorConfig, range: OpeningRange) -> DetectorResult<Self> {
        config.validate()?;
        if !range.is_finalized() {
            return Err(DetectorError::RangeNotFinalized {
                status: format!("{:?}", range.status),
            });
        }
        Ok(Self {
            config,
            range,
            up: DirectionArm::new(),
            down: DirectionArm::new(),
        })
    }

    /// The range breakouts are measured against.
    #[must_use]
    pub fn range(&self) -> &OpeningRange {
        &self.range
    }

    /// Process a post-window tick; returns a confirmed breakout, if any.
    pub fn on_tick(&mut self, tick: &PriceTick) -> Option<BreakoutEvent> {
        if tick.price > self.range.high {
            self.down.reset_count();
            self.advance(Direction::Up, tick)
        } else if tick.price < self.range.low {
            self.up.reset_count();
            self.advance(Direction::Down, tick)
        } else {
            // Inside the band (edges inclusive): both sides start over
            // and become eligible again.
            self.up.rearm();
            self.down.rearm();
            None
        }
    }

    fn advance(&mut self, direction: Direction, tick: &PriceTick) -> Option<BreakoutEvent> {
        let arm = match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };

        if !arm.armed {
            return None;
        }

        arm.consecutive += 1;
        if arm.consecutive < self.config.confirmation_ticks {
            return None;
        }

        arm.armed = false;
        arm.consecutive = 0;

        let event =
            BreakoutEvent::new(direction, tick.price, tick.timestamp, self.range.clone());
        info!(
            event_id = %event.event_id,
            instrument = %event.instrument,
            session_date = %event.session_date,
            direction = %event.direction,
            trigger_price = %event.trigger_price,
            broken_level = %event.broken_level(),
            "Breakout confirmed"
        );
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use orbs_core::{Instrument, Price, Qty};
    use orbs_range::{OpeningRangeTracker, RangeStatus};
    use orbs_session::{SessionClock, WeekdayCalendar};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn spy() -> Instrument {
        Instrument::new("SPY").unwrap()
    }

    fn open() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 9, 13, 30, 0).unwrap()
    }

    /// Finalized range {high: 102, low: 98} for the 2026-02-09 session.
    fn finalized_range() -> OpeningRange {
        let clock = SessionClock::new(
            Arc::new(WeekdayCalendar::default()),
            Duration::minutes(30),
        )
        .unwrap();
        let session = clock
            .session_for(&spy(), chrono::NaiveDate::from_ymd_opt(2026, 2, 9).unwrap())
            .unwrap();
        let mut tracker = OpeningRangeTracker::new(&session);
        for (offset, price) in [(0, dec!(100)), (15, dec!(102)), (29, dec!(98))] {
            tracker
                .apply(&tick(open() + Duration::minutes(offset), price))
                .unwrap();
        }
        tracker.finalize().clone()
    }

    fn tick(ts: DateTime<Utc>, price: Decimal) -> PriceTick {
        PriceTick::new(spy(), ts, Price::new(price), Qty::ZERO).unwrap()
    }

    fn detector(n: u32) -> BreakoutDetector {
        BreakoutDetector::new(
            DetectorConfig {
                confirmation_ticks: n,
            },
            finalized_range(),
        )
        .unwrap()
    }

    /// Feed prices one minute apart starting after the window.
    fn feed(det: &mut BreakoutDetector, prices: &[Decimal]) -> Vec<BreakoutEvent> {
        let start = open() + Duration::minutes(35);
        prices
            .iter()
            .enumerate()
            .filter_map(|(i, p)| det.on_tick(&tick(start + Duration::minutes(i as i64), *p)))
            .collect()
    }

    #[test]
    fn test_rejects_unfinalized_range() {
        let mut forming = finalized_range();
        forming.status = RangeStatus::Forming;
        assert!(matches!(
            BreakoutDetector::new(DetectorConfig::default(), forming),
            Err(DetectorError::RangeNotFinalized { .. })
        ));

        let mut invalid = finalized_range();
        invalid.status = RangeStatus::Invalid;
        assert!(BreakoutDetector::new(DetectorConfig::default(), invalid).is_err());
    }

    #[test]
    fn test_immediate_breakout_with_single_confirmation() {
        let mut det = detector(1);
        let events = feed(&mut det, &[dec!(103)]);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].direction, Direction::Up);
        assert_eq!(events[0].trigger_price.inner(), dec!(103));
    }

    #[test]
    fn test_band_edges_are_inside() {
        let mut det = detector(1);
        // Exactly on high/low: no candidate.
        let events = feed(&mut det, &[dec!(102), dec!(98)]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_confirmation_requires_n_consecutive() {
        // N = 3: two breaching ticks then a retrace emit nothing.
        let mut det = detector(3);
        let events = feed(&mut det, &[dec!(103), dec!(104), dec!(101)]);
        assert!(events.is_empty());

        // Exactly three consecutive emit exactly one event at the third tick.
        let mut det = detector(3);
        let events = feed(&mut det, &[dec!(103), dec!(104), dec!(105)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].trigger_price.inner(), dec!(105));
    }

    #[test]
    fn test_opposite_side_resets_counter() {
        // N = 2: up candidate, then a down breach, then one up tick — the
        // down breach reset the up counter, so no up event yet.
        let mut det = detector(2);
        let events = feed(&mut det, &[dec!(103), dec!(97), dec!(103)]);
        // The lone down tick also fails N=2 confirmation.
        assert!(events.is_empty());

        let events = feed(&mut det, &[dec!(104)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].direction, Direction::Up);
    }

    #[test]
    fn test_no_second_event_without_retrace() {
        let mut det = detector(1);
        let events = feed(&mut det, &[dec!(103), dec!(104), dec!(105)]);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_rearm_after_retrace() {
        let mut det = detector(1);
        let events = feed(&mut det, &[dec!(103), dec!(100), dec!(103.5)]);

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.direction == Direction::Up));
        assert_eq!(events[1].trigger_price.inner(), dec!(103.5));
    }

    #[test]
    fn test_opposite_direction_eligible_after_fire() {
        // False upside breakout followed by a real downside breakout,
        // without the up side ever re-arming.
        let mut det = detector(1);
        let events = feed(&mut det, &[dec!(103), dec!(97)]);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].direction, Direction::Up);
        assert_eq!(events[1].direction, Direction::Down);
    }

    #[test]
    fn test_event_references_range() {
        let mut det = detector(1);
        let events = feed(&mut det, &[dec!(97)]);

        assert_eq!(events[0].broken_level().inner(), dec!(98));
        assert_eq!(events[0].range.high.inner(), dec!(102));
        assert!(events[0].event_id.starts_with("orb_SPY_"));
    }
}
