// src/session.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::REQUEST_TIMEOUT_SECS;
use crate::error::{ConnectorError, Result};

/// A fully shaped GET request for one slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub params: BTreeMap<String, String>,
}

/// Sends requests and decodes JSON bodies. No retries happen at this layer.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get_json(&self, request: &HttpRequest) -> Result<Value>;
}

pub struct ExchangeRatesSession {
    client: Client,
}

impl ExchangeRatesSession {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> Self {
        ExchangeRatesSession { client }
    }
}

#[async_trait]
impl HttpTransport for ExchangeRatesSession {
    async fn get_json(&self, request: &HttpRequest) -> Result<Value> {
        let mut builder = self.client.get(&request.url).query(&request.params);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            tracing::debug!("GET {} returned {}", request.url, status);
            return Err(ConnectorError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        // invalid UTF-8 is a parse error, never replaced
        Ok(serde_json::from_slice(&body)?)
    }
}
