// tests/message_tests.rs

use ratesextract::message::{ConnectionStatus, ConnectorMessage, JsonLinesSink, MessageSink, StateMessage};
use serde_json::{json, Value};

#[test]
fn test_json_lines_sink_writes_one_message_per_line() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.emit(ConnectorMessage::ConnectionStatus {
        connection_status: ConnectionStatus::succeeded(),
    })
    .unwrap();
    sink.emit(ConnectorMessage::State {
        state: StateMessage { data: json!({ "date": "2023-01-02" }) },
    })
    .unwrap();
    sink.emit(ConnectorMessage::log("INFO", "done")).unwrap();

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<Value> = output.lines().map(|line| serde_json::from_str(line).unwrap()).collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], json!({ "type": "CONNECTION_STATUS", "connection_status": { "status": "SUCCEEDED" } }));
    assert_eq!(lines[1], json!({ "type": "STATE", "state": { "data": { "date": "2023-01-02" } } }));
    assert_eq!(lines[2], json!({ "type": "LOG", "log": { "level": "INFO", "message": "done" } }));
}

#[test]
fn test_failed_status_carries_message() {
    let value = serde_json::to_value(ConnectorMessage::ConnectionStatus {
        connection_status: ConnectionStatus::failed("bad base"),
    })
    .unwrap();
    assert_eq!(value["connection_status"]["status"], "FAILED");
    assert_eq!(value["connection_status"]["message"], "bad base");
}
