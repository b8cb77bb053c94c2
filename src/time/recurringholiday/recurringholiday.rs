use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

/// A holiday rule that produces its dates one year at a time.
///
/// Membership is always tested against the dates generated for the
/// query date's own year. A multi-day observance generated for year `y`
/// may spill into `y + 1`; those spilled dates only count when `y + 1`'s
/// own generation produces them as well.
pub trait RecurringHoliday {

    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate>;

    fn is_holiday(&self, d: &NaiveDate) -> bool {
        self.get_holiday(d.year()).contains(d)
    }
}
