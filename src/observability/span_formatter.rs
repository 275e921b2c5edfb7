//! Span journal line format.
//!
//! One JSON object per finished span:
//!
//! ```json
//! {"service":"Reelfinder","trace_id":"…32 hex…","span_id":"…16 hex…","parent_id":null,
//!  "name":"handle_event","start_unix_nano":1700000000000000000,"duration_us":412,
//!  "attrs":{"event":"submit"},"events":[{"name":"searching","attrs":{"query":"alien"}}],
//!  "status":"unset"}
//! ```
//!
//! Attributes are flattened into a plain object; later duplicates of a key win.

use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Map, Value as JsonValue};
use std::time::SystemTime;

pub struct SpanFormatter {
    service: String,
}

impl SpanFormatter {
    /// Takes the service name from the resource's `service.name`.
    pub fn new(resource: &Resource) -> Self {
        let service = resource
            .get(opentelemetry::Key::from_static_str("service.name"))
            .map_or_else(|| "unknown".to_string(), |v| v.as_str().into_owned());
        Self { service }
    }

    pub fn format_span(&self, span: &SpanData) -> JsonValue {
        let parent_id = (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id));
        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "attrs": attributes_object(&event.attributes),
                })
            })
            .collect();

        json!({
            "service": self.service,
            "trace_id": format!("{:032x}", span.span_context.trace_id()),
            "span_id": format!("{:016x}", span.span_context.span_id()),
            "parent_id": parent_id,
            "name": span.name,
            "start_unix_nano": unix_nanos(span.start_time),
            "duration_us": duration_us,
            "attrs": attributes_object(&span.attributes),
            "events": events,
            "status": status_json(&span.status),
        })
    }
}

fn unix_nanos(time: SystemTime) -> u64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

fn attributes_object(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), value_json(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn value_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn status_json(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("service", &self.service)
            .finish()
    }
}
