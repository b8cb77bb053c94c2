use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use crate::time::utility::{days_of_month, days_of_year};

const ONE_DAY: Days = Days::new(1);

/// Upper bound on consecutive holidays skipped while looking for a business day.
const MAX_HOLIDAY_RUN: u32 = 366;

/// Anything that can answer "is this date a holiday?".
///
/// Business-day searches return `None` when more than a year of consecutive
/// holidays is met, or when the representable date range is exhausted.
pub trait HolidayCalendar: Send + Sync {
    fn is_holiday(&self, d: NaiveDate) -> bool;

    /// All holidays (weekends included) whose date lies in `year`.
    fn get_holiday_set(&self, year: i32) -> HashSet<NaiveDate>;

    fn is_business_day(&self, d: NaiveDate) -> bool {
        !self.is_holiday(d)
    }

    fn shift_n_business_day(&self, horizon: NaiveDate, n: i32) -> Option<NaiveDate> {
        let shift_one_day = if n >= 0 {
            |d: NaiveDate| d.checked_add_days(ONE_DAY)
        } else {
            |d: NaiveDate| d.checked_sub_days(ONE_DAY)
        };

        let mut m = n.unsigned_abs();
        let mut d = horizon;
        let mut run = 0u32;
        while m > 0 {
            d = shift_one_day(d)?;
            if self.is_business_day(d) {
                m -= 1;
                run = 0;
            } else {
                run += 1;
                if run > MAX_HOLIDAY_RUN {
                    return None;
                }
            }
        }
        Some(d)
    }

    fn next_business_day(&self, d: NaiveDate) -> Option<NaiveDate> {
        self.shift_n_business_day(d, 1)
    }

    fn previous_business_day(&self, d: NaiveDate) -> Option<NaiveDate> {
        self.shift_n_business_day(d, -1)
    }

    fn last_business_day_of_month(&self, year: i32, month: u32) -> Option<NaiveDate> {
        let eom = NaiveDate::from_ymd_opt(year, month, days_of_month(year, month))?;
        (0..days_of_month(year, month))
            .filter_map(|back| eom.checked_sub_days(Days::new(back as u64)))
            .find(|&d| self.is_business_day(d))
    }

    fn first_business_day_of_month(&self, year: i32, month: u32) -> Option<NaiveDate> {
        let fom = NaiveDate::from_ymd_opt(year, month, 1)?;
        (0..days_of_month(year, month))
            .filter_map(|forward| fom.checked_add_days(Days::new(forward as u64)))
            .find(|&d| self.is_business_day(d))
    }

    fn business_day_count(&self, year: i32) -> u32 {
        days_of_year(year) - self.get_holiday_set(year).len() as u32
    }
}
