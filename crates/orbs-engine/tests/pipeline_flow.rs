//! End-to-end flow through the engine facade: opening range, confirmed
//! breakout, position lifecycle, alert delivery.

use chrono::{DateTime, Duration, TimeZone, Utc};
use orbs_alert::{AlertEvent, AlertSink};
use orbs_core::{Instrument, Price, PriceTick, Qty};
use orbs_engine::{AppConfig, Engine};
use orbs_risk::PositionStatus;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Captures every alert the engine emits.
struct CapturingSink {
    events: Mutex<Vec<AlertEvent>>,
}

impl AlertSink for CapturingSink {
    fn name(&self) -> &str {
        "capturing"
    }

    fn deliver(&self, event: &AlertEvent) {
        self.events.lock().push(event.clone());
    }
}

fn spy() -> Instrument {
    Instrument::new("SPY").unwrap()
}

// 2027-03-01 is a Monday; session open 13:30 UTC.
fn ts(min: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 3, 1, 13, 30, 0).unwrap() + Duration::minutes(min)
}

fn tick(min: i64, price: Decimal) -> PriceTick {
    PriceTick::new(spy(), ts(min), Price::new(price), Qty::ZERO).unwrap()
}

async fn run_engine(config: AppConfig, ticks: Vec<PriceTick>) -> Vec<AlertEvent> {
    let sink = Arc::new(CapturingSink {
        events: Mutex::new(Vec::new()),
    });
    let engine = Engine::new(config, vec![sink.clone()]).unwrap();

    for t in ticks {
        engine.on_tick(t).await;
    }
    engine.shutdown().await;

    let events = sink.events.lock().clone();
    events
}

#[tokio::test]
async fn test_breakout_to_target() {
    // Defaults: 30-minute window, 1-tick confirmation, k=0.5, m=1.0.
    let events = run_engine(
        AppConfig::default(),
        vec![
            tick(0, dec!(100)),
            tick(15, dec!(102)),
            tick(29, dec!(98)),
            // First post-window tick finalizes {102, 98} and breaches up.
            tick(35, dec!(103)),
            // Gaps past the 107 target.
            tick(40, dec!(107.5)),
        ],
    )
    .await;

    assert_eq!(events.len(), 3);

    let AlertEvent::RangeFinalized(range) = &events[0] else {
        panic!("expected RangeFinalized, got {:?}", events[0]);
    };
    assert_eq!(range.high.inner(), dec!(102));
    assert_eq!(range.low.inner(), dec!(98));
    assert_eq!(range.tick_count, 3);

    let AlertEvent::Breakout(breakout) = &events[1] else {
        panic!("expected Breakout, got {:?}", events[1]);
    };
    assert_eq!(breakout.trigger_price.inner(), dec!(103));
    assert_eq!(breakout.timestamp, ts(35));

    let AlertEvent::PositionClosed(position) = &events[2] else {
        panic!("expected PositionClosed, got {:?}", events[2]);
    };
    assert_eq!(position.entry_price.inner(), dec!(103));
    assert_eq!(position.stop_loss.inner(), dec!(101));
    assert_eq!(position.take_profit.inner(), dec!(107));
    assert_eq!(position.status, PositionStatus::ClosedTarget);
    // Settles at the target, not the gapped print: 107 - 103.
    assert_eq!(position.realized_pnl, Some(dec!(4)));
}

#[tokio::test]
async fn test_confirmation_requires_consecutive_breaches() {
    let mut config = AppConfig::default();
    config.detector.confirmation_ticks = 2;

    let events = run_engine(
        config,
        vec![
            tick(0, dec!(100)),
            tick(15, dec!(102)),
            tick(29, dec!(98)),
            // One breach, then back inside: count resets, no event.
            tick(35, dec!(103)),
            tick(36, dec!(101)),
            // Two consecutive breaches confirm.
            tick(40, dec!(102.5)),
            tick(41, dec!(103)),
        ],
    )
    .await;

    let breakouts: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            AlertEvent::Breakout(b) => Some(b),
            _ => None,
        })
        .collect();
    assert_eq!(breakouts.len(), 1);
    assert_eq!(breakouts[0].timestamp, ts(41));
    assert_eq!(breakouts[0].trigger_price.inner(), dec!(103));
}

#[tokio::test]
async fn test_stop_exit_on_down_breakout() {
    let events = run_engine(
        AppConfig::default(),
        vec![
            tick(0, dec!(100)),
            tick(10, dec!(102)),
            tick(20, dec!(98)),
            // Down breach at 97: entry 97, stop 99, target 93.
            tick(35, dec!(97)),
            // Rallies through the stop.
            tick(45, dec!(99.5)),
        ],
    )
    .await;

    let AlertEvent::PositionClosed(position) = events.last().unwrap() else {
        panic!("expected PositionClosed last, got {:?}", events.last());
    };
    assert_eq!(position.status, PositionStatus::ClosedStop);
    assert_eq!(position.realized_pnl, Some(dec!(-2)));
}

#[tokio::test]
async fn test_second_breakout_while_open_is_skipped() {
    let events = run_engine(
        AppConfig::default(),
        vec![
            tick(0, dec!(100)),
            tick(10, dec!(102)),
            tick(20, dec!(98)),
            // Up breakout opens a position (entry 103, stop 101).
            tick(35, dec!(103)),
            // Retrace into the band re-arms detection without hitting the stop.
            tick(40, dec!(101.5)),
            // Down breakout fires while the position is still open: the
            // event is emitted but no second position opens. The same tick
            // then stops out the Up position.
            tick(45, dec!(97)),
        ],
    )
    .await;

    let breakout_count = events
        .iter()
        .filter(|e| matches!(e, AlertEvent::Breakout(_)))
        .count();
    let closed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            AlertEvent::PositionClosed(p) => Some(p),
            _ => None,
        })
        .collect();

    assert_eq!(breakout_count, 2);
    // Only the first (Up) position ever existed.
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].entry_price.inner(), dec!(103));
    assert_eq!(closed[0].status, PositionStatus::ClosedStop);
}

#[tokio::test]
async fn test_session_close_force_closes_at_last_price() {
    let events = run_engine(
        AppConfig::default(),
        vec![
            tick(0, dec!(100)),
            tick(10, dec!(102)),
            tick(20, dec!(98)),
            tick(35, dec!(103)),
            tick(60, dec!(104.5)),
            // At the 20:00 close (minute 390) the session tears down.
            tick(390, dec!(105)),
        ],
    )
    .await;

    let AlertEvent::PositionClosed(position) = events.last().unwrap() else {
        panic!("expected PositionClosed last, got {:?}", events.last());
    };
    assert_eq!(position.status, PositionStatus::ClosedSessionEnd);
    // Marked to the last in-session price, 104.5.
    assert_eq!(position.realized_pnl, Some(dec!(1.5)));
    assert_eq!(position.closed_at, Some(ts(390)));
}

#[tokio::test]
async fn test_instruments_are_independent() {
    let sink = Arc::new(CapturingSink {
        events: Mutex::new(Vec::new()),
    });
    let engine = Engine::new(AppConfig::default(), vec![sink.clone()]).unwrap();

    let qqq = Instrument::new("QQQ").unwrap();
    let qqq_tick = |min: i64, price: Decimal| {
        PriceTick::new(qqq.clone(), ts(min), Price::new(price), Qty::ZERO).unwrap()
    };

    // SPY breaks out; QQQ stays inside its range.
    for t in [
        tick(0, dec!(100)),
        tick(20, dec!(102)),
        tick(35, dec!(103)),
    ] {
        engine.on_tick(t).await;
    }
    for t in [
        qqq_tick(0, dec!(300)),
        qqq_tick(20, dec!(305)),
        qqq_tick(35, dec!(302)),
    ] {
        engine.on_tick(t).await;
    }

    assert_eq!(engine.instrument_count(), 2);
    engine.shutdown().await;

    let events = sink.events.lock();
    let spy_breakouts = events
        .iter()
        .filter(|e| matches!(e, AlertEvent::Breakout(b) if b.instrument.symbol() == "SPY"))
        .count();
    let qqq_breakouts = events
        .iter()
        .filter(|e| matches!(e, AlertEvent::Breakout(b) if b.instrument.symbol() == "QQQ"))
        .count();

    assert_eq!(spy_breakouts, 1);
    assert_eq!(qqq_breakouts, 0);
}
