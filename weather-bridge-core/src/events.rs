//! Lifecycle notifications emitted by the watch companion runtime.
//!
//! They are only logged; nothing in the fetch path reacts to them.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The bridge to the watch is connected.
    Ready(Value),
    /// A message arrived from the watch.
    AppMessage(Value),
    /// The configuration webview was dismissed.
    WebviewClosed(Value),
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

impl HostEvent {
    /// Parse one event of the form `{"type": "appmessage", "payload": {...}}`.
    pub fn from_json_line(line: &str) -> Result<Self, FetchError> {
        let raw: RawEvent = serde_json::from_str(line.trim())?;
        match raw.kind.as_str() {
            "ready" => Ok(Self::Ready(raw.payload)),
            "appmessage" => Ok(Self::AppMessage(raw.payload)),
            "webviewclosed" => Ok(Self::WebviewClosed(raw.payload)),
            other => Err(FetchError::MalformedPayload(format!("unknown host event `{other}`"))),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ready",
            Self::AppMessage(_) => "appmessage",
            Self::WebviewClosed(_) => "webviewclosed",
        }
    }

    pub fn payload(&self) -> &Value {
        match self {
            Self::Ready(p) | Self::AppMessage(p) | Self::WebviewClosed(p) => p,
        }
    }
}

pub fn log_host_event(event: &HostEvent) {
    let payload = event.payload().to_string();
    match event {
        HostEvent::Ready(_) => info!(payload = %payload, "connect!"),
        HostEvent::AppMessage(_) => info!(payload = %payload, "appmessage"),
        HostEvent::WebviewClosed(_) => info!(payload = %payload, "webview closed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_each_kind() {
        let ready = HostEvent::from_json_line(r#"{"type":"ready","payload":{"ready":true}}"#).unwrap();
        assert_eq!(ready, HostEvent::Ready(json!({"ready": true})));
        assert_eq!(ready.kind(), "ready");

        let msg = HostEvent::from_json_line(r#"{"type":"appmessage","payload":{"KEY":1}}"#).unwrap();
        assert_eq!(msg.kind(), "appmessage");
        assert_eq!(msg.payload(), &json!({"KEY": 1}));

        let closed = HostEvent::from_json_line("  {\"type\":\"webviewclosed\",\"payload\":{\"response\":\"\"}}\n").unwrap();
        assert_eq!(closed.kind(), "webviewclosed");
    }

    #[test]
    fn missing_payload_defaults_to_null() {
        let ready = HostEvent::from_json_line(r#"{"type":"ready"}"#).unwrap();
        assert_eq!(ready.payload(), &Value::Null);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = HostEvent::from_json_line(r#"{"type":"showconfiguration"}"#).unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
    }

    #[test]
    fn logging_does_not_panic_without_subscriber() {
        log_host_event(&HostEvent::AppMessage(json!({"WEATHER_ICON_KEY": 5})));
    }
}
