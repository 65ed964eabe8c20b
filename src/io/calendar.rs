// src/io/calendar.rs

use std::collections::BTreeSet;
use std::fmt::Debug;

use chrono::NaiveDate;

/// Answers whether a date is a holiday in the generator's region. Real
/// calendar data (regional holiday tables) lives outside this crate; only
/// the synthetic generator consumes this.
pub trait HolidayCalendar: Debug + Send + Sync {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// No holidays at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// A fixed set of dates, e.g. a regional festival calendar loaded elsewhere.
#[derive(Debug, Clone, Default)]
pub struct FixedHolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl FixedHolidayCalendar {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for FixedHolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}
