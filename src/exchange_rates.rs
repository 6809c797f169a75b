// src/exchange_rates.rs

use chrono::NaiveDateTime;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::checkpoint::Checkpoint;
use crate::config::{self, ExchangeRatesConfig, CURSOR_FIELD, STREAM_NAME, URL_BASE};
use crate::date_range::{DateRangeBuilder, StreamSlice};
use crate::error::Result;
use crate::stream::IncrementalStream;

/// Daily historical rates for one base currency.
#[derive(Debug, Clone)]
pub struct ExchangeRates {
    base: String,
    apikey: String,
    start_date: NaiveDateTime,
}

impl ExchangeRates {
    pub fn new(config: &ExchangeRatesConfig) -> Result<Self> {
        Ok(ExchangeRates {
            base: config.base.clone(),
            apikey: config.apikey.clone(),
            start_date: config.start_datetime()?,
        })
    }
}

impl IncrementalStream for ExchangeRates {
    fn name(&self) -> &str {
        STREAM_NAME
    }

    fn url_base(&self) -> &str {
        URL_BASE
    }

    fn cursor_field(&self) -> &str {
        CURSOR_FIELD
    }

    fn path(&self, slice: &StreamSlice) -> String {
        slice.date.clone()
    }

    fn request_headers(&self, _slice: &StreamSlice) -> BTreeMap<String, String> {
        BTreeMap::from([("apikey".to_string(), self.apikey.clone())])
    }

    fn request_params(&self, _slice: &StreamSlice) -> BTreeMap<String, String> {
        BTreeMap::from([("base".to_string(), self.base.clone())])
    }

    // The body already matches the record shape.
    fn parse_response(&self, body: Value) -> Vec<Value> {
        vec![body]
    }

    /// Restarts from the checkpointed day itself, so that day is read again.
    fn stream_slices(&self, state: Option<&Checkpoint>, now: NaiveDateTime) -> Result<Vec<StreamSlice>> {
        let start = match state {
            Some(checkpoint) => config::midnight(checkpoint.date()),
            None => self.start_date,
        };
        Ok(DateRangeBuilder::plan(start, now))
    }

    fn json_schema(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                "success": { "type": ["null", "boolean"] },
                "historical": { "type": ["null", "boolean"] },
                "timestamp": { "type": ["null", "integer"] },
                "base": { "type": ["null", "string"] },
                "date": { "type": ["null", "string"], "format": "date" },
                "rates": {
                    "type": ["null", "object"],
                    "additionalProperties": { "type": "number" }
                }
            }
        })
    }
}
