// src/stream.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::checkpoint::Checkpoint;
use crate::date_range::StreamSlice;
use crate::error::{ConnectorError, Result};

/// How a read treats stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Re-read everything from the configured start date; no state is kept.
    FullRefresh,
    /// Resume from the stored checkpoint and emit state after each day.
    #[default]
    Incremental,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::FullRefresh => "full_refresh",
            SyncMode::Incremental => "incremental",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMode {
    type Err = ConnectorError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "full_refresh" => Ok(SyncMode::FullRefresh),
            "incremental" => Ok(SyncMode::Incremental),
            other => Err(ConnectorError::Config(format!(
                "unknown sync mode {:?}, expected full_refresh or incremental",
                other
            ))),
        }
    }
}

/// A stream that is read day by day and resumed from a cursor.
///
/// Implementations only shape requests and responses; the read loop owns the
/// checkpoint and the transport.
pub trait IncrementalStream: Send + Sync {
    fn name(&self) -> &str;

    fn url_base(&self) -> &str;

    fn cursor_field(&self) -> &str;

    /// Request path relative to `url_base` for one slice.
    fn path(&self, slice: &StreamSlice) -> String;

    fn request_headers(&self, _slice: &StreamSlice) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn request_params(&self, _slice: &StreamSlice) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Turns one decoded response body into records.
    fn parse_response(&self, body: Value) -> Vec<Value>;

    /// Token for the next page of the same slice; `None` when there is none.
    fn next_page_token(&self, _body: &Value) -> Option<Value> {
        None
    }

    /// Slices still to read given the stored state and the current instant.
    fn stream_slices(&self, state: Option<&Checkpoint>, now: NaiveDateTime) -> Result<Vec<StreamSlice>>;

    fn json_schema(&self) -> Value;
}
