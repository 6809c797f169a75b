// tests/common/mod.rs

use async_trait::async_trait;
use ratesextract::{ConnectorError, ExchangeRatesConfig, HttpRequest, HttpTransport, Result};
use serde_json::{json, Value};
use std::sync::Mutex;

/// Answers each request with the body for its URL's last path segment and
/// records what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    pub requests: Mutex<Vec<HttpRequest>>,
    pub fail_on: Option<String>,
}

impl ScriptedTransport {
    pub fn failing_on(date: &str) -> Self {
        ScriptedTransport {
            requests: Mutex::new(Vec::new()),
            fail_on: Some(date.to_string()),
        }
    }

    pub fn requested_dates(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.url.rsplit('/').next().unwrap().to_string())
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get_json(&self, request: &HttpRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let date = request.url.rsplit('/').next().unwrap().to_string();
        if self.fail_on.as_deref() == Some(date.as_str()) {
            return Err(ConnectorError::Http {
                status: 500,
                body: "upstream unavailable".to_string(),
            });
        }
        Ok(rates_body(&date, &request.params["base"]))
    }
}

pub fn rates_body(date: &str, base: &str) -> Value {
    json!({
        "success": true,
        "historical": true,
        "date": date,
        "timestamp": 1672617599,
        "base": base,
        "rates": { "EUR": 0.93, "GBP": 0.82 }
    })
}

pub fn config(base: &str, start_date: &str) -> ExchangeRatesConfig {
    ExchangeRatesConfig {
        base: base.to_string(),
        apikey: "k".to_string(),
        start_date: start_date.to_string(),
    }
}
