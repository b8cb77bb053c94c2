use chrono::{Datelike, NaiveDate};
use log::debug;
use std::collections::HashSet;

use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::holidayengine::HolidayEngine;
use crate::time::utility::days_of_year;

/// Holiday engine with every holiday of a year range cached in bitsets.
///
/// The engine is moved in, so its custom holidays are frozen for the
/// lifetime of the cache. Dates outside the range fall back to the engine.
pub struct PrecomputedHolidayCalendar {
    engine: HolidayEngine,
    start_year: i32,
    end_year: i32,
    // 3 × u128 per year, enough for 366 days
    precomputed_bits: Vec<YearBitset>,
}

#[derive(Clone)]
struct YearBitset {
    bits: [u128; 3],
}

impl YearBitset {
    fn new() -> Self {
        YearBitset { bits: [0; 3] }
    }

    /// day_of_year: 0-365, where 0 = Jan 1
    #[inline]
    fn set(&mut self, day_of_year: u32) {
        let block = (day_of_year / 128) as usize;
        let bit = day_of_year % 128;
        if block < 3 {
            self.bits[block] |= 1u128 << bit;
        }
    }

    #[inline]
    fn is_set(&self, day_of_year: u32) -> bool {
        let block = (day_of_year / 128) as usize;
        let bit = day_of_year % 128;
        block < 3 && (self.bits[block] & (1u128 << bit)) != 0
    }

    fn from_engine(engine: &HolidayEngine, year: i32) -> Self {
        let mut bitset = YearBitset::new();
        for date in engine.get_holiday_set(year) {
            bitset.set(date.ordinal0());
        }
        bitset
    }

    fn count_holidays(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }
}

impl PrecomputedHolidayCalendar {
    /// Precomputes years `start_year..=end_year`, limited to the years `NaiveDate`
    /// can represent. An inverted or unrepresentable range caches nothing.
    pub fn new(
        engine: HolidayEngine,
        start_year: i32,
        end_year: i32,
    ) -> PrecomputedHolidayCalendar {
        let start_year = start_year.max(NaiveDate::MIN.year());
        let end_year = end_year.min(NaiveDate::MAX.year());
        let n_years = (end_year as i64 - start_year as i64 + 1).max(0) as usize;
        let mut precomputed_bits = Vec::with_capacity(n_years);

        for year in start_year..=end_year {
            precomputed_bits.push(YearBitset::from_engine(&engine, year));
        }
        debug!("precomputed holidays for {} years from {}", precomputed_bits.len(), start_year);

        PrecomputedHolidayCalendar {
            engine,
            start_year,
            end_year,
            precomputed_bits,
        }
    }

    pub fn engine(&self) -> &HolidayEngine {
        &self.engine
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn len(&self) -> usize {
        self.precomputed_bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precomputed_bits.is_empty()
    }

    pub fn in_precomputation_range(&self, year: i32) -> bool {
        !self.is_empty() && year >= self.start_year && year <= self.end_year
    }

    pub fn stats(&self) -> PrecomputedHolidayStats {
        let total_holidays: u32 = self.precomputed_bits.iter()
            .map(|b| b.count_holidays())
            .sum();

        PrecomputedHolidayStats {
            num_years: self.len(),
            total_holidays,
        }
    }
}

/// Holiday counts over the cached years.
#[derive(Debug, PartialEq)]
pub struct PrecomputedHolidayStats {
    pub num_years: usize,
    pub total_holidays: u32,
}

impl PrecomputedHolidayStats {
    pub fn avg_holidays_per_year(&self) -> f64 {
        if self.num_years == 0 {
            0.0
        } else {
            self.total_holidays as f64 / self.num_years as f64
        }
    }
}

impl std::fmt::Display for PrecomputedHolidayStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} holidays cached over {} years ({:.1} per year)",
            self.total_holidays,
            self.num_years,
            self.avg_holidays_per_year()
        )
    }
}

impl HolidayCalendar for PrecomputedHolidayCalendar {
    #[inline]
    fn is_holiday(&self, d: NaiveDate) -> bool {
        if self.in_precomputation_range(d.year()) {
            let index = (d.year() - self.start_year) as usize;
            self.precomputed_bits[index].is_set(d.ordinal0())
        } else {
            self.engine.is_holiday(d)
        }
    }

    fn get_holiday_set(&self, year: i32) -> HashSet<NaiveDate> {
        if !self.in_precomputation_range(year) {
            return self.engine.get_holiday_set(year);
        }

        let bitset = &self.precomputed_bits[(year - self.start_year) as usize];
        (1..=days_of_year(year))
            .filter_map(|ordinal| NaiveDate::from_yo_opt(year, ordinal))
            .filter(|d| bitset.is_set(d.ordinal0()))
            .collect()
    }
}
