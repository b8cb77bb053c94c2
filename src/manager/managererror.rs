use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("{0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("key '{0}' not found")]
    NameNotFoundError(String),
    #[error("invalid holiday: {0}")]
    InvalidHolidayError(String)
}

pub fn parse_json_value<T>(json_value: serde_json::Value) -> Result<T, ManagerError>
    where T: DeserializeOwned {
    serde_json::from_value(json_value).map_err(ManagerError::JsonParseError)
}
