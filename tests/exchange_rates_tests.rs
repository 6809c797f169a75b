// tests/exchange_rates_tests.rs

mod common;

use chrono::NaiveDateTime;
use common::{config, rates_body, ScriptedTransport};
use ratesextract::{Checkpoint, ExchangeRates, IncrementalStream, SliceFetcher, StreamSlice};
use std::collections::BTreeMap;

#[test]
fn test_request_shaping() {
    let stream = ExchangeRates::new(&config("USD", "2023-01-01")).unwrap();
    let slice = StreamSlice::new("2023-01-01");

    assert_eq!(stream.path(&slice), "2023-01-01");
    assert_eq!(
        stream.request_headers(&slice),
        BTreeMap::from([("apikey".to_string(), "k".to_string())])
    );
    assert_eq!(
        stream.request_params(&slice),
        BTreeMap::from([("base".to_string(), "USD".to_string())])
    );
    assert_eq!(stream.next_page_token(&rates_body("2023-01-01", "USD")), None);
}

#[test]
fn test_stream_slices_prefers_state() {
    let stream = ExchangeRates::new(&config("USD", "2023-01-01")).unwrap();
    let now = NaiveDateTime::parse_from_str("2023-01-04 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();

    let fresh = stream.stream_slices(None, now).unwrap();
    assert_eq!(fresh.len(), 3);

    let resumed = stream.stream_slices(Some(&Checkpoint::parse("2023-01-03").unwrap()), now).unwrap();
    assert_eq!(resumed, vec![StreamSlice::new("2023-01-03")]);
}

#[test]
fn test_invalid_start_date() {
    assert!(ExchangeRates::new(&config("USD", "01-01-2023")).is_err());
}

#[tokio::test]
async fn test_fetch_returns_body_unmodified() {
    let stream = ExchangeRates::new(&config("USD", "2023-01-01")).unwrap();
    let transport = ScriptedTransport::default();
    let fetcher = SliceFetcher::new(&stream, &transport);

    let records = fetcher.fetch(&StreamSlice::new("2023-01-01")).await.unwrap();
    assert_eq!(records, vec![rates_body("2023-01-01", "USD")]);

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://api.apilayer.com/exchangerates_data/2023-01-01");
    assert_eq!(requests[0].headers["apikey"], "k");
    assert_eq!(requests[0].params["base"], "USD");
}
