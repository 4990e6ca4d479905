//! Trading calendar abstraction.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use orbs_core::Instrument;
use std::collections::HashSet;

/// Calendar lookup supplied by the host application.
///
/// The engine only asks two questions: is this a trading day, and what
/// are the regular session hours. Everything else (exchange half-days,
/// per-instrument venues) belongs to the implementation.
pub trait TradingCalendar: Send + Sync {
    /// Whether `date` is a trading day for the instrument's market.
    fn is_trading_day(&self, instrument: &Instrument, date: NaiveDate) -> bool;

    /// Regular session (open, close) in UTC for a trading day.
    ///
    /// Returns `None` when `date` is not a trading day.
    fn session_hours(
        &self,
        instrument: &Instrument,
        date: NaiveDate,
    ) -> Option<(NaiveTime, NaiveTime)>;
}

/// Monday-Friday calendar with fixed UTC session hours and a holiday list.
///
/// Defaults to 13:30-20:00 UTC, the US equity regular session.
#[derive(Debug, Clone)]
pub struct WeekdayCalendar {
    open: NaiveTime,
    close: NaiveTime,
    holidays: HashSet<NaiveDate>,
}

impl WeekdayCalendar {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            open,
            close,
            holidays: HashSet::new(),
        }
    }

    /// Add market holidays (full-day closures).
    #[must_use]
    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(holidays);
        self
    }
}

impl Default for WeekdayCalendar {
    fn default() -> Self {
        // US regular session in UTC (EST; the host supplies DST-adjusted
        // hours or its own calendar when that matters).
        Self::new(
            NaiveTime::from_hms_opt(13, 30, 0).expect("valid time"),
            NaiveTime::from_hms_opt(20, 0, 0).expect("valid time"),
        )
    }
}

impl TradingCalendar for WeekdayCalendar {
    fn is_trading_day(&self, _instrument: &Instrument, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }

    fn session_hours(
        &self,
        instrument: &Instrument,
        date: NaiveDate,
    ) -> Option<(NaiveTime, NaiveTime)> {
        if self.is_trading_day(instrument, date) {
            Some((self.open, self.close))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spy() -> Instrument {
        Instrument::new("SPY").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekdays_are_trading_days() {
        let cal = WeekdayCalendar::default();
        // 2026-02-09 is a Monday
        for day in 9..=13 {
            assert!(cal.is_trading_day(&spy(), date(2026, 2, day)));
        }
    }

    #[test]
    fn test_weekend_is_closed() {
        let cal = WeekdayCalendar::default();
        // 2026-02-07 Saturday, 2026-02-08 Sunday
        assert!(!cal.is_trading_day(&spy(), date(2026, 2, 7)));
        assert!(!cal.is_trading_day(&spy(), date(2026, 2, 8)));
        assert!(cal.session_hours(&spy(), date(2026, 2, 7)).is_none());
    }

    #[test]
    fn test_holiday_is_closed() {
        // 2026-07-03 is a Friday (observed Independence Day)
        let holiday = date(2026, 7, 3);
        let cal = WeekdayCalendar::default().with_holidays([holiday]);

        assert!(!cal.is_trading_day(&spy(), holiday));
        assert!(cal.is_trading_day(&spy(), date(2026, 7, 2)));
    }

    #[test]
    fn test_default_session_hours() {
        let cal = WeekdayCalendar::default();
        let (open, close) = cal.session_hours(&spy(), date(2026, 2, 9)).unwrap();

        assert_eq!(open, NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        assert_eq!(close, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
    }
}
