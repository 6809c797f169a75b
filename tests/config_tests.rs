// tests/config_tests.rs

use chrono::NaiveDate;
use ratesextract::{ConnectorError, ExchangeRatesConfig};
use serde_json::json;
use std::io::Write;

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"base": "USD", "apikey": "secret", "start_date": "2023-01-01"}}"#).unwrap();

    let config = ExchangeRatesConfig::from_file(file.path()).unwrap();
    assert_eq!(config.base, "USD");
    assert_eq!(config.apikey, "secret");
    assert_eq!(config.start_date().unwrap(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
}

#[test]
fn test_config_rejects_bad_start_date() {
    let result = ExchangeRatesConfig::from_value(json!({
        "base": "USD",
        "apikey": "secret",
        "start_date": "2023/01/01"
    }));
    assert!(matches!(result, Err(ConnectorError::Config(_))));
}

#[test]
fn test_config_rejects_missing_field() {
    let result = ExchangeRatesConfig::from_value(json!({ "base": "USD", "start_date": "2023-01-01" }));
    match result {
        Err(ConnectorError::Config(message)) => assert!(message.contains("apikey")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ExchangeRatesConfig::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConnectorError::Config(_))));
}

#[test]
fn test_debug_hides_apikey() {
    let config = ExchangeRatesConfig::from_value(json!({
        "base": "USD",
        "apikey": "secret",
        "start_date": "2023-01-01"
    }))
    .unwrap();
    let debug = format!("{:?}", config);
    assert!(!debug.contains("secret"));
    assert!(debug.contains("USD"));
}
