use std::collections::HashSet;
use std::sync::Arc;

use chrono::{
    Datelike,
    Days,
    NaiveDate,
    Weekday
};
use log::debug;

use crate::time::calendar::customholiday::CustomHoliday;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::regionprofile::{Region, RegionProfile};
use crate::time::utility::days_of_year;

const SEVEN_DAYS: Days = Days::new(7);

/// Weekend days as a bitmask, one bit per weekday from Monday.
#[derive(Clone, Copy, Debug)]
struct WeekendMask(u8);

impl WeekendMask {
    fn new(include_saturday: bool) -> Self {
        let mut mask = 1u8 << Weekday::Sun.num_days_from_monday();
        if include_saturday {
            mask |= 1u8 << Weekday::Sat.num_days_from_monday();
        }
        WeekendMask(mask)
    }

    #[inline]
    fn is_weekend(&self, weekday: Weekday) -> bool {
        let bit = 1u8 << weekday.num_days_from_monday();
        (self.0 & bit) != 0
    }

    fn weekend_list(&self) -> Vec<Weekday> {
        let mut weekdays = Vec::with_capacity(2);
        for day in 0..7u8 {
            if (self.0 & (1u8 << day)) != 0 {
                if let Ok(weekday) = Weekday::try_from(day) {
                    weekdays.push(weekday);
                }
            }
        }
        weekdays
    }
}

/// Decides whether a date is a holiday under one region profile.
///
/// A date is a holiday when any of these hold:
/// 1. it is a Sunday, or a Saturday when Saturdays are included;
/// 2. its (month, day) is one of the profile's fixed holidays;
/// 3. it lies in a lunar window projected for its own year;
/// 4. it matches a registered custom holiday.
///
/// The engine is plain data and therefore `Send + Sync`. Queries take `&self`;
/// registering custom holidays takes `&mut self`.
#[derive(Clone, Debug)]
pub struct HolidayEngine {
    weekends: WeekendMask,
    include_saturday: bool,
    profile: Arc<RegionProfile>,
    custom_holidays: HashSet<CustomHoliday>
}

impl HolidayEngine {
    pub fn new(include_saturday: bool, profile: Arc<RegionProfile>) -> HolidayEngine {
        HolidayEngine {
            weekends: WeekendMask::new(include_saturday),
            include_saturday,
            profile,
            custom_holidays: HashSet::new()
        }
    }

    pub fn for_region(include_saturday: bool, region: Region) -> HolidayEngine {
        debug!("building holiday engine for {:?} (include_saturday = {})", region, include_saturday);
        HolidayEngine::new(include_saturday, Arc::new(region.profile()))
    }

    pub fn include_saturday(&self) -> bool {
        self.include_saturday
    }

    pub fn profile(&self) -> &Arc<RegionProfile> {
        &self.profile
    }

    pub fn custom_holidays(&self) -> &HashSet<CustomHoliday> {
        &self.custom_holidays
    }

    /// Registers a custom holiday. Registering an identical entry again is a no-op.
    pub fn add_custom_holiday(&mut self, date: NaiveDate, recurring: bool, lunar_linked: bool) {
        let holiday = CustomHoliday::new(date, recurring, lunar_linked);
        if self.custom_holidays.insert(holiday) {
            debug!("registered custom holiday {:?}", holiday);
        } else {
            debug!("custom holiday {:?} already registered", holiday);
        }
    }

    #[inline]
    pub fn is_weekend(&self, d: NaiveDate) -> bool {
        self.weekends.is_weekend(d.weekday())
    }

    #[inline]
    pub fn is_fixed_holiday(&self, d: NaiveDate) -> bool {
        self.profile.is_fixed_holiday(d)
    }

    pub fn is_lunar_holiday(&self, d: NaiveDate) -> bool {
        self.profile.lunar_holiday_set(d.year()).contains(&d)
    }

    pub fn is_custom_holiday(&self, d: NaiveDate) -> bool {
        self.custom_holidays.iter().any(|holiday| {
            // A lunar link tests the entry's own date against its own year's
            // lunar windows, so the result does not depend on `d`.
            holiday.matches_date(d)
                || (holiday.lunar_linked() && self.is_lunar_holiday(holiday.date()))
        })
    }

    /// True when some lunar-linked entry makes every date a holiday.
    fn has_always_matching_custom_holiday(&self) -> bool {
        self.custom_holidays
            .iter()
            .any(|holiday| holiday.lunar_linked() && self.is_lunar_holiday(holiday.date()))
    }

    fn weekend_set(&self, year: i32) -> HashSet<NaiveDate> {
        let mut weekend_set = HashSet::with_capacity(106);
        let (Some(year_start), Some(year_end)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31)
        ) else {
            return weekend_set;
        };

        for target_weekday in self.weekends.weekend_list() {
            let offset = (7 + target_weekday.num_days_from_monday()
                - year_start.weekday().num_days_from_monday()) % 7;
            let mut current = year_start.checked_add_days(Days::new(offset as u64));
            while let Some(d) = current.filter(|d| *d <= year_end) {
                weekend_set.insert(d);
                current = d.checked_add_days(SEVEN_DAYS);
            }
        }
        weekend_set
    }

    fn all_dates_of_year(year: i32) -> HashSet<NaiveDate> {
        (1..=days_of_year(year))
            .filter_map(|ordinal| NaiveDate::from_yo_opt(year, ordinal))
            .collect()
    }
}

impl HolidayCalendar for HolidayEngine {
    fn is_holiday(&self, d: NaiveDate) -> bool {
        self.is_weekend(d)
            || self.is_fixed_holiday(d)
            || self.is_lunar_holiday(d)
            || self.is_custom_holiday(d)
    }

    fn get_holiday_set(&self, year: i32) -> HashSet<NaiveDate> {
        if self.has_always_matching_custom_holiday() {
            return HolidayEngine::all_dates_of_year(year);
        }

        let mut holiday_set = self.weekend_set(year);
        holiday_set.extend(self.profile.holiday_set_in_year(year));
        holiday_set.extend(
            self.custom_holidays
                .iter()
                .filter_map(|holiday| holiday.date_in_year(year))
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

    fn base(include_saturday: bool) -> HolidayEngine {
        HolidayEngine::for_region(include_saturday, Region::Base)
    }

    #[test]
    fn end_to_end_base() {
        let engine = base(false);
        assert!(engine.is_holiday(date(2024, 1, 1)));
        assert!(engine.is_holiday(date(2024, 7, 7)));
        assert!(!engine.is_holiday(date(2024, 7, 6)));
    }

    #[test]
    fn saturday_counts_only_when_included() {
        assert!(!base(false).is_holiday(date(2024, 4, 27)));
        assert!(base(true).is_holiday(date(2024, 4, 27)));
        assert!(base(false).is_holiday(date(2024, 4, 28)));
    }

    #[test]
    fn fixed_holiday_on_weekday() {
        let engine = base(false);
        assert!(engine.is_fixed_holiday(date(2024, 4, 23)));
        assert!(engine.is_holiday(date(2024, 4, 23)));
        assert!(!engine.is_holiday(date(2024, 4, 24)));
    }

    #[test]
    fn lunar_window_in_reference_year() {
        let engine = base(false);
        for d in [date(2024, 4, 10), date(2024, 4, 11), date(2024, 4, 12)] {
            assert!(engine.is_lunar_holiday(d));
            assert!(engine.is_holiday(d));
        }
        assert!(!engine.is_holiday(date(2024, 4, 13)));
    }

    #[test]
    fn lunar_window_projected_to_other_years() {
        let engine = base(false);
        assert!(engine.is_holiday(date(2026, 3, 20)));
        assert!(engine.is_holiday(date(2025, 6, 20)));
        assert!(!engine.is_holiday(date(2025, 4, 2)));
    }

    #[test]
    fn recurring_custom_holiday() {
        let mut engine = base(false);
        engine.add_custom_holiday(date(2024, 12, 25), true, false);
        assert!(engine.is_holiday(date(2024, 12, 25)));
        assert!(engine.is_holiday(date(2025, 12, 25)));
    }

    #[test]
    fn single_custom_holiday() {
        let mut engine = base(false);
        engine.add_custom_holiday(date(2024, 12, 25), false, false);
        assert!(engine.is_holiday(date(2024, 12, 25)));
        assert!(!engine.is_holiday(date(2025, 12, 25)));
    }

    #[test]
    fn duplicate_registration_is_a_no_op() {
        let mut engine = base(false);
        engine.add_custom_holiday(date(2024, 12, 25), true, false);
        engine.add_custom_holiday(date(2024, 12, 25), true, false);
        assert_eq!(engine.custom_holidays().len(), 1);
        engine.add_custom_holiday(date(2024, 12, 25), false, false);
        assert_eq!(engine.custom_holidays().len(), 2);
    }

    #[test]
    fn lunar_link_outside_window_behaves_like_plain_entry() {
        let mut engine = base(false);
        engine.add_custom_holiday(date(2024, 12, 25), false, true);
        assert!(engine.is_holiday(date(2024, 12, 25)));
        assert!(!engine.is_holiday(date(2024, 12, 26)));
    }

    #[test]
    fn lunar_link_inside_window_matches_every_date() {
        let mut engine = base(false);
        engine.add_custom_holiday(date(2024, 4, 11), false, true);
        assert!(engine.is_custom_holiday(date(2024, 3, 6)));
        assert!(engine.is_holiday(date(2031, 9, 10)));
        assert_eq!(engine.get_holiday_set(2024).len(), 366);
    }

    #[test]
    fn holiday_set_matches_day_by_day_check() {
        let mut engine = HolidayEngine::for_region(true, Region::Trnc);
        engine.add_custom_holiday(date(2024, 12, 25), true, false);
        engine.add_custom_holiday(date(2023, 3, 8), false, false);
        engine.add_custom_holiday(date(2024, 2, 29), true, false);
        for year in [2023, 2024, 2025, 2030] {
            let expected: HashSet<NaiveDate> = HolidayEngine::all_dates_of_year(year)
                .into_iter()
                .filter(|d| engine.is_holiday(*d))
                .collect();
            assert_eq!(engine.get_holiday_set(year), expected, "year {}", year);
        }
    }

    #[test]
    fn weekend_set_counts() {
        // 2024 has 52 Sundays and 52 Saturdays.
        assert_eq!(base(false).weekend_set(2024).len(), 52);
        assert_eq!(base(true).weekend_set(2024).len(), 104);
        // 2023 starts on a Sunday.
        assert_eq!(base(false).weekend_set(2023).len(), 53);
    }

    #[test]
    fn business_day_navigation() {
        let engine = base(false);
        // Friday 2024-04-19 -> Saturday is a business day here.
        assert_eq!(engine.next_business_day(date(2024, 4, 19)), Some(date(2024, 4, 20)));
        // Skip the lunar window and the Sunday after it.
        assert_eq!(engine.next_business_day(date(2024, 4, 9)), Some(date(2024, 4, 13)));
        assert_eq!(engine.previous_business_day(date(2024, 4, 15)), Some(date(2024, 4, 13)));
        assert_eq!(engine.shift_n_business_day(date(2024, 4, 9), 2), Some(date(2024, 4, 15)));
        assert_eq!(engine.first_business_day_of_month(2024, 1), Some(date(2024, 1, 2)));
        assert_eq!(engine.last_business_day_of_month(2024, 6), Some(date(2024, 6, 27)));
    }

    #[test]
    fn business_day_search_gives_up_when_every_day_is_a_holiday() {
        let mut engine = base(false);
        engine.add_custom_holiday(date(2024, 4, 10), true, true);
        assert_eq!(engine.next_business_day(date(2024, 5, 2)), None);
        assert_eq!(engine.first_business_day_of_month(2024, 5), None);
    }

    #[test]
    fn business_day_count_matches_day_by_day_check() {
        for include_saturday in [false, true] {
            let engine = base(include_saturday);
            for year in [2023, 2024, 2025] {
                let expected = HolidayEngine::all_dates_of_year(year)
                    .into_iter()
                    .filter(|d| engine.is_business_day(*d))
                    .count() as u32;
                assert_eq!(engine.business_day_count(year), expected, "year {}", year);
            }
        }
        assert!(base(true).business_day_count(2024) < base(false).business_day_count(2024));
    }

    #[test]
    fn business_day_count_is_zero_when_every_day_is_a_holiday() {
        let mut engine = base(false);
        engine.add_custom_holiday(date(2024, 4, 10), true, true);
        assert_eq!(engine.business_day_count(2024), 0);
        assert_eq!(engine.business_day_count(2025), 0);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HolidayEngine>();
    }
}
