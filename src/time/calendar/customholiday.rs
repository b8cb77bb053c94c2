use chrono::{Datelike, NaiveDate};
use serde::{
    Serialize,
    Deserialize
};

/// A user-registered holiday.
///
/// Entries compare by full value, so registering an identical entry twice
/// has no further effect.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CustomHoliday {
    date: NaiveDate,
    #[serde(default)]
    recurring: bool,
    #[serde(default)]
    lunar_linked: bool
}

impl CustomHoliday {
    pub fn new(date: NaiveDate, recurring: bool, lunar_linked: bool) -> CustomHoliday {
        CustomHoliday { date, recurring, lunar_linked }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn recurring(&self) -> bool {
        self.recurring
    }

    pub fn lunar_linked(&self) -> bool {
        self.lunar_linked
    }

    /// Date part of the rule: (month, day) when recurring, exact date otherwise.
    #[inline]
    pub fn matches_date(&self, d: NaiveDate) -> bool {
        if self.recurring {
            d.month() == self.date.month() && d.day() == self.date.day()
        } else {
            d == self.date
        }
    }

    /// The date this entry contributes to `year`, ignoring any lunar link.
    pub fn date_in_year(&self, year: i32) -> Option<NaiveDate> {
        if self.recurring {
            NaiveDate::from_ymd_opt(year, self.date.month(), self.date.day())
        } else if self.date.year() == year {
            Some(self.date)
        } else {
            None
        }
    }
}
