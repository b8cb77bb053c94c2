use std::error::Error;
use std::process::ExitCode;

use chrono::NaiveDate;
use log::error;

use holidaycheck::configuration::Configuration;

const USAGE: &str = "usage: holidaycheck <config.json> <calendar-name> <YYYY-MM-DD>...";

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let [config_path, calendar_name, dates @ ..] = args else {
        return Err(USAGE.into());
    };
    if dates.is_empty() {
        return Err(USAGE.into());
    }

    let mut config = Configuration::new();
    config.from_reader(config_path)?;
    let calendar = config.holiday_calendar_manager().get(calendar_name)?;

    for arg in dates {
        let d = NaiveDate::parse_from_str(arg, "%Y-%m-%d")
            .map_err(|err| format!("invalid date '{}': {}", arg, err))?;
        println!("{} {}", d, calendar.is_holiday(d));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
