// src/message.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;

use crate::error::Result;
use crate::stream::SyncMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConnectionStatus {
    pub fn succeeded() -> Self {
        ConnectionStatus { status: Status::Succeeded, message: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ConnectionStatus { status: Status::Failed, message: Some(message.into()) }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Succeeded
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub name: String,
    pub json_schema: Value,
    pub supported_sync_modes: Vec<SyncMode>,
    pub source_defined_cursor: bool,
    pub default_cursor_field: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub streams: Vec<StreamDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMessage {
    pub stream: String,
    pub data: Value,
    pub emitted_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMessage {
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: String,
    pub message: String,
}

/// One line of connector output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorMessage {
    Spec { connection_specification: Value },
    ConnectionStatus { connection_status: ConnectionStatus },
    Catalog { catalog: Catalog },
    Record { record: RecordMessage },
    State { state: StateMessage },
    Log { log: LogMessage },
}

impl ConnectorMessage {
    pub fn log(level: &str, message: impl Into<String>) -> Self {
        ConnectorMessage::Log {
            log: LogMessage { level: level.to_string(), message: message.into() },
        }
    }
}

/// Destination for connector output.
pub trait MessageSink {
    fn emit(&mut self, message: ConnectorMessage) -> Result<()>;
}

/// Writes each message as a JSON line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for JsonLinesSink<W> {
    fn emit(&mut self, message: ConnectorMessage) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl MessageSink for Vec<ConnectorMessage> {
    fn emit(&mut self, message: ConnectorMessage) -> Result<()> {
        self.push(message);
        Ok(())
    }
}
