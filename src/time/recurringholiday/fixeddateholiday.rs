use std::collections::HashSet;

use chrono::{
    Datelike,
    NaiveDate
};

use super::recurringholiday::RecurringHoliday;

/// A holiday on the same (month, day) every year.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct FixedDateHoliday {
    month: u32,
    day: u32
}

impl FixedDateHoliday {
    /// Returns `None` when (month, day) does not exist even in a leap year.
    pub fn new(month: u32, day: u32) -> Option<FixedDateHoliday> {
        NaiveDate::from_ymd_opt(2000, month, day)
            .map(|_| FixedDateHoliday { month, day })
    }

    pub(crate) fn from_date(d: NaiveDate) -> FixedDateHoliday {
        FixedDateHoliday { month: d.month(), day: d.day() }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Year is ignored.
    #[inline]
    pub fn matches(&self, d: NaiveDate) -> bool {
        d.month() == self.month && d.day() == self.day
    }
}

impl RecurringHoliday for FixedDateHoliday {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .into_iter()
            .collect()
    }

    fn is_holiday(&self, d: &NaiveDate) -> bool {
        self.matches(*d)
    }
}
