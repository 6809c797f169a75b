// src/checkpoint.rs

use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::{self, CURSOR_FIELD, DATE_FORMAT};
use crate::date_range::StreamSlice;
use crate::error::{ConnectorError, Result};

/// Durable marker of extraction progress: the last day fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    date: NaiveDate,
}

impl Checkpoint {
    pub fn new(date: NaiveDate) -> Self {
        Checkpoint { date }
    }

    /// Parses a `YYYY-MM-DD` cursor value.
    pub fn parse(value: &str) -> Result<Self> {
        config::parse_date(value)
            .map(Checkpoint::new)
            .map_err(|e| ConnectorError::State(format!("stored {} {:?} is invalid: {}", CURSOR_FIELD, value, e)))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Reads a stored state blob. An object without a cursor field means no
    /// prior progress.
    pub fn from_state_value(value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Object(map) => match map.get(CURSOR_FIELD) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(date)) => Self::parse(date).map(Some),
                Some(other) => Err(ConnectorError::State(format!(
                    "stored {} must be a string, got {}",
                    CURSOR_FIELD, other
                ))),
            },
            other => Err(ConnectorError::State(format!("state must be a JSON object, got {}", other))),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let raw = fs::read_to_string(path.as_ref())?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| ConnectorError::State(format!("state file is not valid JSON: {}", e)))?;
        Self::from_state_value(&value)
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ CURSOR_FIELD: self.to_string() })
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format(DATE_FORMAT))
    }
}

/// Owns the cursor for a single read. Updated only by the sequential fetch
/// loop, so it needs no synchronisation.
#[derive(Debug, Clone)]
pub struct CheckpointManager {
    start_date: NaiveDate,
    cursor: Option<NaiveDate>,
}

impl CheckpointManager {
    pub fn new(start_date: NaiveDate, stored: Option<&Checkpoint>) -> Self {
        CheckpointManager {
            start_date,
            cursor: stored.map(Checkpoint::date),
        }
    }

    /// The stored cursor, or the configured start date before any progress.
    pub fn current_state(&self) -> Checkpoint {
        Checkpoint::new(self.cursor.unwrap_or(self.start_date))
    }

    /// Moves the cursor to the slice's day. Never moves it backwards.
    pub fn advance(&mut self, slice: &StreamSlice) -> Result<()> {
        let date = slice.day()?;
        match self.cursor {
            Some(current) if current > date => {
                tracing::warn!("Ignoring checkpoint regression from {} to {}", current, date);
            }
            _ => self.cursor = Some(date),
        }
        Ok(())
    }
}
