//! ratesextract CLI: spec, check, discover and read commands.
//!
//! Protocol messages go to stdout as JSON lines; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use ratesextract::message::{ConnectionStatus, ConnectorMessage, JsonLinesSink, MessageSink};
use ratesextract::{
    Checkpoint, ExchangeRatesConfig, ExchangeRatesSession, ExchangeRatesSource, SyncMode,
};

#[derive(Parser)]
#[command(
    name = "ratesextract",
    about = "Incremental extraction of daily exchange rates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the configuration schema.
    Spec,
    /// Validate the configuration.
    Check {
        /// Path to the JSON config file.
        #[arg(long)]
        config: PathBuf,
    },
    /// Print the stream catalog.
    Discover {
        /// Path to the JSON config file.
        #[arg(long)]
        config: PathBuf,
    },
    /// Extract one record per day since the start date or the stored state.
    Read {
        /// Path to the JSON config file.
        #[arg(long)]
        config: PathBuf,

        /// Path to a JSON state file from a previous run.
        #[arg(long)]
        state: Option<PathBuf>,

        /// full_refresh ignores --state and re-reads from start_date.
        #[arg(long, default_value_t = SyncMode::Incremental)]
        sync_mode: SyncMode,
    },
}

fn init_tracing() {
    let fmt_layer = fmt::layer().with_writer(io::stderr).with_target(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let source = ExchangeRatesSource::new();
    let mut sink = JsonLinesSink::new(io::stdout().lock());

    match cli.command {
        Commands::Spec => {
            sink.emit(ConnectorMessage::Spec {
                connection_specification: source.spec(),
            })?;
        }
        Commands::Check { config } => {
            let connection_status = match ExchangeRatesConfig::from_file(&config) {
                Ok(config) => source.check(&config),
                Err(error) => ConnectionStatus::failed(error.to_string()),
            };
            if !connection_status.is_success() {
                tracing::warn!("Connection check failed");
            }
            sink.emit(ConnectorMessage::ConnectionStatus { connection_status })?;
        }
        Commands::Discover { config } => {
            let config = ExchangeRatesConfig::from_file(&config)?;
            let catalog = source.discover(&config)?;
            sink.emit(ConnectorMessage::Catalog { catalog })?;
        }
        Commands::Read { config, state, sync_mode } => {
            let config = ExchangeRatesConfig::from_file(&config)?;
            let state = match state {
                Some(_) if sync_mode == SyncMode::FullRefresh => {
                    tracing::info!("Ignoring state file in full_refresh mode");
                    None
                }
                Some(path) => Checkpoint::from_file(&path)
                    .with_context(|| format!("failed to load state from {}", path.display()))?,
                None => None,
            };
            let session = ExchangeRatesSession::new()?;
            let checkpoint = source.read(&config, state, sync_mode, &session, &mut sink).await?;
            tracing::info!("Sync complete, checkpoint at {}", checkpoint);
        }
    }

    Ok(())
}
