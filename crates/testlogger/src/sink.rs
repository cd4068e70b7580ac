//! Destinations for rendered log records.
//!
//! A [`Sink`] receives one [`Record`] per log call. Before each record the
//! logger calls [`Sink::helper`] so sinks that attribute lines to source
//! locations can skip the logger's own frames.

use std::{
    fmt,
    io::Write,
    mem,
    sync::atomic::{AtomicU64, AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use tracing::debug;

use crate::Result;

/// A line-oriented log destination.
pub trait Sink: Send + Sync {
    /// Mark the caller as a logging helper frame. Called before every
    /// [`Sink::log`].
    fn helper(&self) {}

    /// Deliver one record.
    fn log(&self, record: Record);
}

/// One log call, split into the arguments handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Level tag, `INFO` or `ERROR`.
    pub level: &'static str,
    /// Logger name, when the logger has one.
    pub prefix: Option<String>,
    /// Log message.
    pub message: String,
    /// Rendered key/value fields without the leading space, when any were
    /// written.
    pub fields: Option<String>,
}

impl Record {
    /// The record as a variadic argument list: level, `prefix:` (if any),
    /// message, fields (if any).
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.level.to_string()];
        if let Some(prefix) = &self.prefix {
            args.push(format!("{prefix}:"));
        }
        args.push(self.message.clone());
        if let Some(fields) = &self.fields {
            args.push(fields.clone());
        }
        args
    }
}

/// The arguments joined by single spaces.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args().join(" "))
    }
}

/// Sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct CaptureSink {
    /// Records in arrival order.
    records: Mutex<Vec<Record>>,
    /// Number of helper marks received.
    helpers: AtomicUsize,
}

impl CaptureSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured records.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Captured records rendered as lines.
    pub fn lines(&self) -> Vec<String> {
        self.records.lock().iter().map(ToString::to_string).collect()
    }

    /// Number of times [`Sink::helper`] was called.
    pub fn helper_calls(&self) -> usize {
        self.helpers.load(Ordering::SeqCst)
    }

    /// Remove and return the captured records.
    pub fn take(&self) -> Vec<Record> {
        mem::take(&mut *self.records.lock())
    }
}

impl Sink for CaptureSink {
    fn helper(&self) {
        self.helpers.fetch_add(1, Ordering::SeqCst);
    }

    fn log(&self, record: Record) {
        self.records.lock().push(record);
    }
}

/// Sink that hands each record to a callback, such as a test harness's
/// reporting function.
pub struct FnSink<F> {
    /// The callback.
    f: F,
}

impl<F> FnSink<F>
where
    F: Fn(Record) + Send + Sync,
{
    /// Wrap a callback.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Sink for FnSink<F>
where
    F: Fn(Record) + Send + Sync,
{
    fn log(&self, record: Record) {
        (self.f)(record);
    }
}

/// Sink that writes one line per record to an [`io::Write`](std::io::Write).
///
/// Write failures are counted and reported through `tracing` at debug level
/// (the first one and every thousandth after that); the record is dropped.
#[derive(Debug)]
pub struct WriterSink<W> {
    /// Destination writer.
    writer: Mutex<W>,
    /// Count of records dropped because the write failed.
    dropped: AtomicU64,
}

impl<W> WriterSink<W>
where
    W: Write,
{
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            dropped: AtomicU64::new(0),
        }
    }

    /// Write a record as one line and flush.
    pub fn write_record(&self, record: &Record) -> Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{record}")?;
        writer.flush()?;
        Ok(())
    }

    /// Number of records dropped due to write failures.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::SeqCst)
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn log(&self, record: Record) {
        if let Err(err) = self.write_record(&record) {
            let n = self.dropped.fetch_add(1, Ordering::SeqCst) + 1;
            if n == 1 || n.is_multiple_of(1000) {
                debug!(count = n, error = %err, "sink_write_drop");
            }
        }
    }
}
