#![warn(missing_docs)]

//! A structured logger that renders key/value context into plain lines.
//!
//! [`Logger`] carries a name and a list of context values. Each call combines
//! the context with the call's own key/value pairs, drops duplicate keys
//! (call values win), renders the result with [`kvfmt`] and hands the line to
//! a [`Sink`], for example a test harness's reporting callback.
//!
//! This crate provides:
//! - [`Logger`]: the logger itself
//! - [`sink`]: the [`Sink`] trait plus in-memory, callback and writer sinks
//! - [`forward`]: a channel sink and a `tracing` layer that routes events
//!   into a [`Logger`]
//! - [`init`]: `tracing` subscriber setup for tests

use std::{error::Error as StdError, fmt, sync::Arc};

use kvfmt::{Value, kv_list_format, trim_duplicates};

mod error;
pub mod forward;
pub mod init;
pub mod sink;

pub use error::{Error, Result};
pub use kvfmt::kvs;
pub use sink::{CaptureSink, FnSink, Record, Sink, WriterSink};

/// Logger that renders structured values into lines for a [`Sink`].
///
/// Loggers are cheap to clone and never change once built: [`with_name`] and
/// [`with_values`] return new loggers. Values added to a derived logger are
/// never visible to its parent or siblings.
///
/// [`with_name`]: Logger::with_name
/// [`with_values`]: Logger::with_values
#[derive(Clone)]
pub struct Logger {
    /// Destination for rendered records.
    sink: Arc<dyn Sink>,
    /// `/`-separated logger name, empty for the root logger.
    prefix: String,
    /// Context key/value list prepended to every call.
    values: Arc<[Value]>,
}

impl Logger {
    /// Create a logger with no name and no context values.
    pub fn new<S>(sink: S) -> Self
    where
        S: Sink + 'static,
    {
        Self::from_arc(Arc::new(sink))
    }

    /// Create a logger for a shared sink.
    pub fn from_arc(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink,
            prefix: String::new(),
            values: Arc::from(Vec::new()),
        }
    }

    /// The logger name.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The accumulated context values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Always true; this logger does not filter by level.
    pub fn enabled(&self) -> bool {
        true
    }

    /// Return a logger for verbosity `level`. Levels are accepted but
    /// ignored, so this is the same logger.
    #[must_use]
    pub fn v(&self, _level: i32) -> Self {
        self.clone()
    }

    /// Return a logger with `name` appended to the name, `/`-separated.
    #[must_use]
    pub fn with_name(&self, name: &str) -> Self {
        let prefix = if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.prefix, name)
        };
        Self {
            sink: Arc::clone(&self.sink),
            prefix,
            values: Arc::clone(&self.values),
        }
    }

    /// Return a logger with `kvs` appended to the context values.
    ///
    /// The new logger owns a fresh copy of the combined list.
    #[must_use]
    pub fn with_values(&self, kvs: &[Value]) -> Self {
        let mut values = Vec::with_capacity(self.values.len() + kvs.len());
        values.extend_from_slice(&self.values);
        values.extend_from_slice(kvs);
        Self {
            sink: Arc::clone(&self.sink),
            prefix: self.prefix.clone(),
            values: values.into(),
        }
    }

    /// Log an informational message with key/value pairs.
    pub fn info(&self, msg: &str, kvs: &[Value]) {
        self.emit("INFO", msg, None, kvs);
    }

    /// Log an error with a message and key/value pairs. The error is
    /// rendered first as `err="..."` and is never deduplicated against the
    /// other pairs.
    pub fn error<E>(&self, err: E, msg: &str, kvs: &[Value])
    where
        E: StdError + Send + Sync + 'static,
    {
        self.emit("ERROR", msg, Some(&Value::error(err)), kvs);
    }

    /// Render and deliver one record.
    pub(crate) fn emit(
        &self,
        level: &'static str,
        msg: &str,
        err: Option<&Value>,
        kvs: &[Value],
    ) {
        self.sink.helper();
        let mut buffer = String::new();
        if let Some(err) = err {
            kv_list_format(&mut buffer, &[Value::from("err"), err.clone()]);
        }
        for list in trim_duplicates(&[&self.values[..], kvs]) {
            kv_list_format(&mut buffer, &list);
        }
        let record = Record {
            level,
            prefix: (!self.prefix.is_empty()).then(|| self.prefix.clone()),
            message: msg.to_string(),
            // Skip the leading space written by kv_list_format.
            fields: buffer.strip_prefix(' ').map(str::to_string),
        };
        self.sink.log(record);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}
