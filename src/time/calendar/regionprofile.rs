use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{
    Serialize,
    Deserialize
};

use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::lunarholiday::{LunarHoliday, REFERENCE_YEAR};
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;

const BASE_FIXED_HOLIDAYS: [(u32, u32); 7] = [
    (1, 1),   // New Year's Day
    (4, 23),  // National Sovereignty and Children's Day
    (5, 1),   // Labour Day
    (5, 19),  // Commemoration of Atatürk, Youth and Sports Day
    (7, 20),  // Peace and Freedom Day
    (8, 30),  // Victory Day
    (10, 29), // Republic Day
];

const TRNC_FIXED_HOLIDAYS: [(u32, u32); 2] = [
    (8, 1),   // TMT Day
    (11, 15), // Proclamation of the Republic
];

// (name, anchor month, anchor day, duration) in the reference year.
const BASE_LUNAR_HOLIDAYS: [(&str, u32, u32, u32); 2] = [
    ("ramazanBayrami", 4, 10, 3),
    ("kurbanBayrami", 6, 28, 4),
];

const TRNC_LUNAR_HOLIDAYS: [(&str, u32, u32, u32); 1] = [
    ("mevlidKandili", 9, 15, 1),
];

/// Rule sets with compiled-in tables.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Region {
    Base,
    Turkey,
    Trnc
}

impl Region {
    pub fn profile(&self) -> RegionProfile {
        match self {
            Region::Base   => RegionProfile::base(),
            Region::Turkey => RegionProfile::turkey(),
            Region::Trnc   => RegionProfile::trnc()
        }
    }
}

/// Fixed and lunar holiday tables of one jurisdiction.
///
/// Never mutated once built; regional variants are made with [`RegionProfile::extend`].
#[derive(Clone, Debug, PartialEq)]
pub struct RegionProfile {
    fixed_holidays: HashSet<FixedDateHoliday>,
    lunar_holidays: Vec<LunarHoliday>
}

fn fixed_table(table: &[(u32, u32)]) -> HashSet<FixedDateHoliday> {
    table.iter()
        .filter_map(|&(month, day)| FixedDateHoliday::new(month, day))
        .collect()
}

fn lunar_table(table: &[(&str, u32, u32, u32)]) -> Vec<LunarHoliday> {
    table.iter()
        .filter_map(|&(name, month, day, duration_days)| {
            let anchor = NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)?;
            LunarHoliday::new(name, anchor, duration_days)
        })
        .collect()
}

impl RegionProfile {
    pub fn new(fixed_holidays: HashSet<FixedDateHoliday>, lunar_holidays: Vec<LunarHoliday>) -> RegionProfile {
        RegionProfile { fixed_holidays, lunar_holidays }
    }

    pub fn base() -> RegionProfile {
        RegionProfile::new(fixed_table(&BASE_FIXED_HOLIDAYS), lunar_table(&BASE_LUNAR_HOLIDAYS))
    }

    pub fn turkey() -> RegionProfile {
        RegionProfile::base()
    }

    pub fn trnc() -> RegionProfile {
        let delta = RegionProfile::new(fixed_table(&TRNC_FIXED_HOLIDAYS), lunar_table(&TRNC_LUNAR_HOLIDAYS));
        RegionProfile::base().extend(&delta)
    }

    /// Union of `self` and `delta`. Entries of `self` are never removed and keep their order.
    pub fn extend(&self, delta: &RegionProfile) -> RegionProfile {
        let mut fixed_holidays = self.fixed_holidays.clone();
        fixed_holidays.extend(delta.fixed_holidays.iter().copied());

        let mut lunar_holidays = self.lunar_holidays.clone();
        for lunar_holiday in delta.lunar_holidays.iter() {
            if !lunar_holidays.contains(lunar_holiday) {
                lunar_holidays.push(lunar_holiday.clone());
            }
        }

        debug!(
            "extended region profile to {} fixed and {} lunar holidays",
            fixed_holidays.len(),
            lunar_holidays.len()
        );
        RegionProfile { fixed_holidays, lunar_holidays }
    }

    pub fn fixed_holidays(&self) -> &HashSet<FixedDateHoliday> {
        &self.fixed_holidays
    }

    pub fn lunar_holidays(&self) -> &[LunarHoliday] {
        &self.lunar_holidays
    }

    #[inline]
    pub fn is_fixed_holiday(&self, d: NaiveDate) -> bool {
        self.fixed_holidays.contains(&FixedDateHoliday::from_date(d))
    }

    /// Every date emitted by the lunar windows projected for `year`.
    pub fn lunar_holiday_set(&self, year: i32) -> HashSet<NaiveDate> {
        let mut holiday_set = HashSet::new();
        for lunar_holiday in self.lunar_holidays.iter() {
            holiday_set.extend(lunar_holiday.get_holiday(year));
        }
        holiday_set
    }

    pub fn is_lunar_holiday(&self, d: NaiveDate) -> bool {
        self.lunar_holidays.iter().any(|h| h.is_holiday(&d))
    }

    /// Fixed holidays falling in `year`.
    pub fn fixed_holiday_set(&self, year: i32) -> HashSet<NaiveDate> {
        let mut holiday_set = HashSet::with_capacity(self.fixed_holidays.len());
        for fixed_holiday in self.fixed_holidays.iter() {
            holiday_set.extend(fixed_holiday.get_holiday(year));
        }
        holiday_set
    }

    /// Fixed and lunar holidays whose date lies in `year`.
    pub fn holiday_set_in_year(&self, year: i32) -> HashSet<NaiveDate> {
        let mut holiday_set = self.fixed_holiday_set(year);
        holiday_set.extend(
            self.lunar_holiday_set(year)
                .into_iter()
                .filter(|d| d.year() == year)
        );
        holiday_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn base_tables_are_complete() {
        let base = RegionProfile::base();
        assert_eq!(base.fixed_holidays().len(), 7);
        let names: Vec<&str> = base.lunar_holidays().iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["ramazanBayrami", "kurbanBayrami"]);
    }

    #[test]
    fn turkey_is_base() {
        assert_eq!(RegionProfile::turkey(), RegionProfile::base());
        assert_eq!(Region::Turkey.profile(), Region::Base.profile());
    }

    #[test]
    fn trnc_adds_to_base() {
        let trnc = RegionProfile::trnc();
        let base = RegionProfile::base();
        assert_eq!(trnc.fixed_holidays().len(), 9);
        assert!(base.fixed_holidays().is_subset(trnc.fixed_holidays()));
        assert_eq!(&trnc.lunar_holidays()[..2], base.lunar_holidays());
        assert_eq!(trnc.lunar_holidays()[2].name(), "mevlidKandili");
        assert!(trnc.is_fixed_holiday(date(2024, 8, 1)));
        assert!(!base.is_fixed_holiday(date(2024, 8, 1)));
    }

    #[test]
    fn extend_skips_entries_already_present() {
        let base = RegionProfile::base();
        let extended = base.extend(&base);
        assert_eq!(extended, base);
    }

    #[test]
    fn lunar_set_unions_all_windows() {
        let set = RegionProfile::base().lunar_holiday_set(2025);
        let expected = HashSet::from([
            date(2025, 3, 30), date(2025, 3, 31), date(2025, 4, 1),
            date(2025, 6, 17), date(2025, 6, 18), date(2025, 6, 19), date(2025, 6, 20),
        ]);
        assert_eq!(set, expected);
        assert!(RegionProfile::trnc().is_lunar_holiday(date(2025, 9, 4)));
        assert!(!RegionProfile::base().is_lunar_holiday(date(2025, 9, 4)));
    }

    #[test]
    fn holiday_set_in_year_combines_fixed_and_lunar() {
        let set = RegionProfile::base().holiday_set_in_year(2024);
        assert_eq!(set.len(), 7 + 3 + 4);
        assert!(set.contains(&date(2024, 10, 29)));
        assert!(set.contains(&date(2024, 7, 1)));
    }

    #[test]
    fn region_deserializes_from_variant_name() {
        let region: Region = serde_json::from_str("\"Trnc\"").unwrap();
        assert_eq!(region, Region::Trnc);
    }
}
