// src/source.rs

use chrono::{Local, NaiveDateTime, Utc};
use serde_json::{json, Value};

use crate::checkpoint::{Checkpoint, CheckpointManager};
use crate::config::{ExchangeRatesConfig, ACCEPTED_CURRENCIES};
use crate::error::{ConnectorError, Result};
use crate::exchange_rates::ExchangeRates;
use crate::fetcher::SliceFetcher;
use crate::message::{
    Catalog, ConnectionStatus, ConnectorMessage, MessageSink, RecordMessage, StateMessage,
    StreamDescriptor,
};
use crate::session::HttpTransport;
use crate::stream::{IncrementalStream, SyncMode};

/// Entry point tying the stream, checkpoint and transport together.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExchangeRatesSource;

impl ExchangeRatesSource {
    pub fn new() -> Self {
        ExchangeRatesSource
    }

    /// Validates the base currency against the accepted set. No I/O.
    pub fn check(&self, config: &ExchangeRatesConfig) -> ConnectionStatus {
        match check_base(&config.base) {
            Ok(()) => ConnectionStatus::succeeded(),
            Err(ConnectorError::Config(message)) => ConnectionStatus::failed(message),
            Err(other) => ConnectionStatus::failed(other.to_string()),
        }
    }

    /// JSON schema of the configuration this source accepts.
    pub fn spec(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "Exchange Rates Spec",
            "type": "object",
            "required": ["base", "apikey", "start_date"],
            "additionalProperties": true,
            "properties": {
                "base": {
                    "type": "string",
                    "description": "Base currency the rates are quoted against",
                    "enum": ACCEPTED_CURRENCIES
                },
                "apikey": {
                    "type": "string",
                    "description": "API key for apilayer",
                    "airbyte_secret": true
                },
                "start_date": {
                    "type": "string",
                    "description": "First day to extract, YYYY-MM-DD",
                    "pattern": "^[0-9]{4}-[0-9]{2}-[0-9]{2}$"
                }
            }
        })
    }

    pub fn streams(&self, config: &ExchangeRatesConfig) -> Result<Vec<ExchangeRates>> {
        Ok(vec![ExchangeRates::new(config)?])
    }

    pub fn discover(&self, config: &ExchangeRatesConfig) -> Result<Catalog> {
        let streams = self
            .streams(config)?
            .iter()
            .map(|stream| StreamDescriptor {
                name: stream.name().to_string(),
                json_schema: stream.json_schema(),
                supported_sync_modes: vec![SyncMode::FullRefresh, SyncMode::Incremental],
                source_defined_cursor: true,
                default_cursor_field: vec![stream.cursor_field().to_string()],
            })
            .collect();
        Ok(Catalog { streams })
    }

    /// Reads every day up to the local clock.
    pub async fn read<T, K>(
        &self,
        config: &ExchangeRatesConfig,
        state: Option<Checkpoint>,
        sync_mode: SyncMode,
        transport: &T,
        sink: &mut K,
    ) -> Result<Checkpoint>
    where
        T: HttpTransport,
        K: MessageSink,
    {
        let now = Local::now().naive_local();
        self.read_until(config, state, sync_mode, transport, sink, now).await
    }

    /// Reads one slice at a time in order, emitting a RECORD per row and, in
    /// incremental mode, a STATE after each day. The first failure is logged
    /// and stops the run, leaving the last emitted STATE at the last day that
    /// succeeded. Full refresh ignores `state` and starts from `start_date`.
    pub async fn read_until<T, K>(
        &self,
        config: &ExchangeRatesConfig,
        state: Option<Checkpoint>,
        sync_mode: SyncMode,
        transport: &T,
        sink: &mut K,
        now: NaiveDateTime,
    ) -> Result<Checkpoint>
    where
        T: HttpTransport,
        K: MessageSink,
    {
        check_base(&config.base)?;

        let state = match sync_mode {
            SyncMode::Incremental => state,
            SyncMode::FullRefresh => None,
        };
        let stream = ExchangeRates::new(config)?;
        let mut checkpoint = CheckpointManager::new(config.start_date()?, state.as_ref());
        let slices = stream.stream_slices(state.as_ref(), now)?;
        tracing::info!(
            "Reading {} slices of {} ({}) starting from {}",
            slices.len(),
            stream.name(),
            sync_mode,
            checkpoint.current_state()
        );

        let fetcher = SliceFetcher::new(&stream, transport);
        for slice in &slices {
            let records = match fetcher.fetch(slice).await {
                Ok(records) => records,
                Err(error) => {
                    let message = format!("Failed to read {} for {}: {}", stream.name(), slice.date, error);
                    tracing::error!("{}", message);
                    sink.emit(ConnectorMessage::log("ERROR", message))?;
                    return Err(error);
                }
            };

            for data in records {
                sink.emit(ConnectorMessage::Record {
                    record: RecordMessage {
                        stream: stream.name().to_string(),
                        data,
                        emitted_at: Utc::now().timestamp_millis(),
                    },
                })?;
            }

            checkpoint.advance(slice)?;
            if sync_mode == SyncMode::Incremental {
                sink.emit(ConnectorMessage::State {
                    state: StateMessage { data: checkpoint.current_state().to_value() },
                })?;
            }
        }

        tracing::info!("Finished reading {}", stream.name());
        Ok(checkpoint.current_state())
    }
}

/// Rejects any base currency outside the accepted set.
pub fn check_base(base: &str) -> Result<()> {
    if ACCEPTED_CURRENCIES.contains(&base) {
        Ok(())
    } else {
        Err(ConnectorError::Config(format!(
            "Input currency {} is invalid. Please input one of the following currencies: {}",
            base,
            ACCEPTED_CURRENCIES.join(", ")
        )))
    }
}
