use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::manager::manager::Manager;
use crate::manager::managererror::{ManagerError, parse_json_value};
use crate::time::calendar::customholiday::CustomHoliday;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::holidayengine::HolidayEngine;
use crate::time::calendar::precomputedholidaycalendar::PrecomputedHolidayCalendar;
use crate::time::calendar::regionprofile::{Region, RegionProfile};
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::lunarholiday::LunarHoliday;

pub type HolidayCalendarManager = Manager<Arc<dyn HolidayCalendar>>;

#[derive(Deserialize)]
struct FixedDateHolidayJsonProp {
    month: u32,
    day: u32
}

fn fixed_date_holiday_from_json_prop(prop: &FixedDateHolidayJsonProp) -> Result<FixedDateHoliday, ManagerError> {
    FixedDateHoliday::new(prop.month, prop.day).ok_or_else(|| {
        ManagerError::InvalidHolidayError(format!("{:02}-{:02} is not a calendar day", prop.month, prop.day))
    })
}

#[derive(Deserialize)]
struct LunarHolidayJsonProp {
    name: String,
    anchor_date: NaiveDate,
    duration_days: u32
}

fn lunar_holiday_from_json_prop(prop: LunarHolidayJsonProp) -> Result<LunarHoliday, ManagerError> {
    let name = prop.name.clone();
    LunarHoliday::new(prop.name, prop.anchor_date, prop.duration_days).ok_or_else(|| {
        ManagerError::InvalidHolidayError(format!("lunar holiday '{}' must last at least one day", name))
    })
}

#[derive(Deserialize, Default)]
struct PrecomputationJsonProp {
    apply: bool,
    start_year: Option<i32>,
    end_year: Option<i32>
}

fn precomputation_range_from_json_prop(prop: &PrecomputationJsonProp) -> Result<(i32, i32), ManagerError> {
    let (Some(start_year), Some(end_year)) = (prop.start_year, prop.end_year) else {
        return Err(ManagerError::InvalidHolidayError(
            "precomputation needs both start_year and end_year".to_string()
        ));
    };
    if start_year > end_year {
        return Err(ManagerError::InvalidHolidayError(
            format!("precomputation start_year {} is after end_year {}", start_year, end_year)
        ));
    }
    let representable = NaiveDate::MIN.year()..=NaiveDate::MAX.year();
    if !representable.contains(&start_year) || !representable.contains(&end_year) {
        return Err(ManagerError::InvalidHolidayError(format!(
            "precomputation years must lie in {}..={}",
            representable.start(),
            representable.end()
        )));
    }
    Ok((start_year, end_year))
}

#[derive(Deserialize)]
struct HolidayCalendarJsonProp {
    region: Region,
    #[serde(default)]
    include_saturday: bool,
    #[serde(default)]
    additional_fixed_holidays: Vec<FixedDateHolidayJsonProp>,
    #[serde(default)]
    additional_lunar_holidays: Vec<LunarHolidayJsonProp>,
    #[serde(default)]
    custom_holidays: Vec<CustomHoliday>,
    #[serde(default)]
    precomputation: PrecomputationJsonProp
}

fn holiday_engine_from_json_prop(json_prop: HolidayCalendarJsonProp) -> Result<(HolidayEngine, PrecomputationJsonProp), ManagerError> {
    let fixed_holidays = json_prop.additional_fixed_holidays
        .iter()
        .map(fixed_date_holiday_from_json_prop)
        .collect::<Result<HashSet<FixedDateHoliday>, ManagerError>>()?;
    let lunar_holidays = json_prop.additional_lunar_holidays
        .into_iter()
        .map(lunar_holiday_from_json_prop)
        .collect::<Result<Vec<LunarHoliday>, ManagerError>>()?;

    let base_profile = json_prop.region.profile();
    let profile = if fixed_holidays.is_empty() && lunar_holidays.is_empty() {
        base_profile
    } else {
        base_profile.extend(&RegionProfile::new(fixed_holidays, lunar_holidays))
    };

    let mut engine = HolidayEngine::new(json_prop.include_saturday, Arc::new(profile));
    for holiday in json_prop.custom_holidays {
        engine.add_custom_holiday(holiday.date(), holiday.recurring(), holiday.lunar_linked());
    }
    Ok((engine, json_prop.precomputation))
}

pub fn holiday_calendar_from_json(json_value: serde_json::Value) -> Result<Arc<dyn HolidayCalendar>, ManagerError> {
    let json_prop: HolidayCalendarJsonProp = parse_json_value(json_value)?;
    let (engine, precomputation) = holiday_engine_from_json_prop(json_prop)?;

    if precomputation.apply {
        let (start_year, end_year) = precomputation_range_from_json_prop(&precomputation)?;
        let precomputed = PrecomputedHolidayCalendar::new(engine, start_year, end_year);
        Ok(Arc::new(precomputed))
    } else {
        Ok(Arc::new(engine))
    }
}

pub fn new_holiday_calendar_manager() -> HolidayCalendarManager {
    Manager::new(holiday_calendar_from_json)
}
