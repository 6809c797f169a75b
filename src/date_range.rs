// src/date_range.rs

use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::{self, DATE_FORMAT};
use crate::error::{ConnectorError, Result};

/// One calendar day of extraction work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSlice {
    pub date: String,
}

impl StreamSlice {
    pub fn new(date: impl Into<String>) -> Self {
        StreamSlice { date: date.into() }
    }

    pub fn day(&self) -> Result<NaiveDate> {
        config::parse_date(&self.date)
            .map_err(|e| ConnectorError::State(format!("invalid slice date {:?}: {}", self.date, e)))
    }
}

/// Splits a time range into single-day slices.
pub struct DateRangeBuilder;

impl DateRangeBuilder {
    /// Emits every day from `start` while it is still strictly before `now`.
    ///
    /// The comparison is on the full timestamp, so the calendar day of `now`
    /// is included whenever `now` lies past its midnight.
    pub fn plan(start: NaiveDateTime, now: NaiveDateTime) -> Vec<StreamSlice> {
        let mut date_range = Vec::new();
        let mut current = start;
        while current < now {
            date_range.push(StreamSlice::new(current.format(DATE_FORMAT).to_string()));
            current += ChronoDuration::days(1);
        }
        date_range
    }
}
