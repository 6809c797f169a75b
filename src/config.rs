// src/config.rs

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{ConnectorError, Result};

pub const URL_BASE: &str = "https://api.apilayer.com/exchangerates_data/";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const CURSOR_FIELD: &str = "date";
pub const STREAM_NAME: &str = "exchange_rates";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Base currencies the connection check accepts.
pub const ACCEPTED_CURRENCIES: &[&str] = &["USD", "JPY", "BGN", "CZK", "DKK"];

/// User-supplied connector configuration. Immutable for the run.
#[derive(Clone, Deserialize)]
pub struct ExchangeRatesConfig {
    pub base: String,
    pub apikey: String,
    pub start_date: String,
}

impl ExchangeRatesConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            ConnectorError::Config(format!("unable to read config file {}: {}", path.display(), e))
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| {
            ConnectorError::Config(format!("config file {} is not valid JSON: {}", path.display(), e))
        })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let config: ExchangeRatesConfig = serde_json::from_value(value)
            .map_err(|e| ConnectorError::Config(format!("invalid config: {}", e)))?;
        // fail early on a bad date instead of at the first slice
        config.start_datetime()?;
        Ok(config)
    }

    pub fn start_date(&self) -> Result<NaiveDate> {
        parse_date(&self.start_date).map_err(|_| {
            ConnectorError::Config(format!(
                "start_date {:?} does not match format YYYY-MM-DD",
                self.start_date
            ))
        })
    }

    /// Midnight of the configured start date.
    pub fn start_datetime(&self) -> Result<NaiveDateTime> {
        Ok(midnight(self.start_date()?))
    }
}

impl fmt::Debug for ExchangeRatesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeRatesConfig")
            .field("base", &self.base)
            .field("apikey", &"***")
            .field("start_date", &self.start_date)
            .finish()
    }
}

pub(crate) fn parse_date(value: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

pub(crate) fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}
