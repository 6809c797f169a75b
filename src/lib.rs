// src/lib.rs

pub mod checkpoint;
pub mod config;
pub mod date_range;
pub mod error;
pub mod exchange_rates;
pub mod fetcher;
pub mod message;
pub mod session;
pub mod source;
pub mod stream;

pub use checkpoint::{Checkpoint, CheckpointManager};
pub use config::ExchangeRatesConfig;
pub use date_range::{DateRangeBuilder, StreamSlice};
pub use error::{ConnectorError, Result};
pub use exchange_rates::ExchangeRates;
pub use fetcher::SliceFetcher;
pub use message::{ConnectorMessage, JsonLinesSink, MessageSink};
pub use session::{ExchangeRatesSession, HttpRequest, HttpTransport};
pub use source::ExchangeRatesSource;
pub use stream::{IncrementalStream, SyncMode};
