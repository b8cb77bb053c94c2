use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::time::calendar::holidaycalendarmanager::{
    HolidayCalendarManager,
    new_holiday_calendar_manager
};

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    holiday_calendar: Vec<serde_json::Value>
}

pub struct Configuration {
    holiday_calendar_manager: HolidayCalendarManager
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            holiday_calendar_manager: new_holiday_calendar_manager()
        }
    }

    pub fn holiday_calendar_manager(&self) -> &HolidayCalendarManager {
        &self.holiday_calendar_manager
    }

    pub fn holiday_calendar_manager_mut(&mut self) -> &mut HolidayCalendarManager {
        &mut self.holiday_calendar_manager
    }

    pub fn from_reader(&mut self, file_path: impl AsRef<Path>) -> Result<(), ManagerError> {
        info!("reading configuration from {}", file_path.as_ref().display());
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        self.load(json_prop)
    }

    pub fn from_json_str(&mut self, json: &str) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        self.load(json_prop)
    }

    fn load(&mut self, json_prop: ConfigurationJsonProp) -> Result<(), ManagerError> {
        self.holiday_calendar_manager.insert_obj_from_json_vec(&json_prop.holiday_calendar)?;
        info!("{} holiday calendars available", self.holiday_calendar_manager.len());
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}
