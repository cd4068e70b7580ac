//! Collect the fields of a `tracing` event into a key/value list.

use std::{error::Error as StdError, fmt::Debug};

use tracing::{
    Event, Level,
    field::{Field, Visit},
};

use crate::Value;

/// Field names that are treated as the event's error.
const ERROR_FIELDS: &[&str] = &["err", "error"];

/// Fields extracted from a tracing Event.
#[derive(Debug, Clone)]
pub struct EventFields {
    /// Severity level of the event.
    pub level: Level,
    /// Event target (typically the module path).
    pub target: String,
    /// The `message` field, or empty when the event has none.
    pub message: String,
    /// The first error recorded under `err` or `error`.
    pub error: Option<Value>,
    /// Remaining fields as an alternating key/value list.
    pub fields: Vec<Value>,
}

/// Split a tracing Event into message, error and key/value fields.
///
/// Typed fields keep their kind: strings become [`Value::Str`], integers,
/// floats and bools their numeric variants, errors [`Value::Error`], and
/// `?`/`%` fields are kept verbatim.
pub fn collect_event(event: &Event<'_>) -> EventFields {
    /// Visitor that sorts fields into message, error and the rest.
    struct FieldVisitor {
        /// Captured `message` field, if present.
        msg: Option<String>,
        /// Captured error field, if present.
        error: Option<Value>,
        /// Accumulated non-message fields.
        fields: Vec<Value>,
    }
    impl FieldVisitor {
        /// Append a key/value pair.
        fn push(&mut self, field: &Field, value: Value) {
            self.fields.push(Value::from(field.name()));
            self.fields.push(value);
        }
    }
    impl Visit for FieldVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.msg = Some(value.to_string());
            } else {
                self.push(field, Value::from(value));
            }
        }
        fn record_i64(&mut self, field: &Field, value: i64) {
            self.push(field, Value::Int(value));
        }
        fn record_u64(&mut self, field: &Field, value: u64) {
            self.push(field, Value::Uint(value));
        }
        fn record_f64(&mut self, field: &Field, value: f64) {
            self.push(field, Value::Float(value));
        }
        fn record_bool(&mut self, field: &Field, value: bool) {
            self.push(field, Value::Bool(value));
        }
        fn record_error(&mut self, field: &Field, value: &(dyn StdError + 'static)) {
            let err = Value::error_message(value.to_string());
            if self.error.is_none() && ERROR_FIELDS.contains(&field.name()) {
                self.error = Some(err);
            } else {
                self.push(field, err);
            }
        }
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            if field.name() == "message" {
                self.msg = Some(format!("{:?}", value));
            } else {
                self.push(field, Value::verbatim(format!("{:?}", value)));
            }
        }
    }
    let meta = event.metadata();
    let mut vis = FieldVisitor {
        msg: None,
        error: None,
        fields: Vec::new(),
    };
    event.record(&mut vis);
    EventFields {
        level: *meta.level(),
        target: meta.target().to_string(),
        message: vis.msg.unwrap_or_default(),
        error: vis.error,
        fields: vis.fields,
    }
}
