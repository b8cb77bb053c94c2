use std::collections::HashSet;

use chrono::{
    Datelike,
    NaiveDate,
    TimeDelta
};
use log::trace;

use super::recurringholiday::RecurringHoliday;
use super::super::rangeofdates::RangeOfDates;

/// Mean length of a lunar year in days.
pub const LUNAR_YEAR_DAYS: f64 = 354.36667;

/// Year in which every lunar anchor date is given.
pub const REFERENCE_YEAR: i32 = 2024;

/// Number of days the observance moves between `REFERENCE_YEAR` and `year`.
pub fn lunar_shift_days(year: i32) -> i64 {
    let year_offset = (year as i64) - (REFERENCE_YEAR as i64);
    (year_offset as f64 * LUNAR_YEAR_DAYS).round() as i64
}

/// A multi-day observance that follows the lunar calendar.
///
/// The date is approximated by shifting the 2024 anchor by a whole number
/// of mean lunar years, not by astronomical observation.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct LunarHoliday {
    name: String,
    anchor_date: NaiveDate,
    duration_days: u32
}

impl LunarHoliday {
    /// Returns `None` when `duration_days` is zero.
    pub fn new(name: impl Into<String>, anchor_date: NaiveDate, duration_days: u32) -> Option<LunarHoliday> {
        if duration_days == 0 {
            None
        } else {
            Some(LunarHoliday { name: name.into(), anchor_date, duration_days })
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn projected_start(&self, year: i32) -> Option<NaiveDate> {
        let shift = TimeDelta::try_days(lunar_shift_days(year))?;
        self.anchor_date.checked_add_signed(shift)
    }

    /// The observance as projected for `year`. It may cross into a neighbouring year.
    pub fn window(&self, year: i32) -> Option<RangeOfDates> {
        let start = self.projected_start(year)?;
        let window = RangeOfDates::from_start(start, self.duration_days);
        trace!("lunar holiday '{}' projected for {}: {:?}", self.name, year, window);
        window
    }
}

impl RecurringHoliday for LunarHoliday {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate> {
        self.window(year)
            .map(|window| window.iter().collect())
            .unwrap_or_default()
    }

    fn is_holiday(&self, d: &NaiveDate) -> bool {
        self.window(d.year()).is_some_and(|window| window.contain(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ramazan() -> LunarHoliday {
        LunarHoliday::new("ramazanBayrami", date(2024, 4, 10), 3).unwrap()
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(LunarHoliday::new("empty", date(2024, 1, 1), 0).is_none());
    }

    #[test]
    fn shift_is_rounded_multiple_of_lunar_year() {
        assert_eq!(lunar_shift_days(2024), 0);
        assert_eq!(lunar_shift_days(2025), 354);
        assert_eq!(lunar_shift_days(2026), 709);
        assert_eq!(lunar_shift_days(2023), -354);
        assert_eq!(lunar_shift_days(2030), 2126);
    }

    #[test]
    fn reference_year_emits_anchor_window() {
        let expected = HashSet::from([date(2024, 4, 10), date(2024, 4, 11), date(2024, 4, 12)]);
        assert_eq!(ramazan().get_holiday(2024), expected);
        assert!(!ramazan().is_holiday(&date(2024, 4, 13)));
    }

    #[test]
    fn later_and_earlier_years_are_projected() {
        assert_eq!(ramazan().projected_start(2025), Some(date(2025, 3, 30)));
        assert_eq!(ramazan().projected_start(2026), Some(date(2026, 3, 20)));
        assert_eq!(ramazan().projected_start(2023), Some(date(2023, 4, 22)));
        assert!(ramazan().is_holiday(&date(2025, 4, 1)));
        assert!(!ramazan().is_holiday(&date(2025, 4, 2)));
    }

    #[test]
    fn window_spilling_into_next_year_only_counts_for_its_own_year() {
        let year_end = LunarHoliday::new("yearEnd", date(2024, 12, 31), 2).unwrap();
        let dates = year_end.get_holiday(2024);
        assert!(dates.contains(&date(2025, 1, 1)));
        // 2025-01-01 is tested against the 2025 projection, which starts on 2025-12-20.
        assert!(!year_end.is_holiday(&date(2025, 1, 1)));
        assert!(year_end.is_holiday(&date(2024, 12, 31)));
    }

    #[test]
    fn unrepresentable_projection_yields_nothing() {
        let far = LunarHoliday::new("far", NaiveDate::MAX, 3).unwrap();
        assert!(far.get_holiday(2025).is_empty());
    }
}
