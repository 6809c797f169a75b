// src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConnectorError>;

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConnectorError {
    /// Failures raised while fetching a slice. Parse errors count as
    /// transport failures since the body came off the wire malformed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ConnectorError::Transport(_) | ConnectorError::Http { .. } | ConnectorError::Parse(_)
        )
    }
}
