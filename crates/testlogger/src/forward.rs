//! Forward records across a channel, and `tracing` events into a [`Logger`].
//!
//! Usage:
//! - Create a bounded `tokio::sync::mpsc` channel and wrap the sender in a
//!   [`ChannelSink`]; build a [`Logger`] on it and drain the receiver
//!   wherever the lines should be displayed.
//! - Install [`layer`] in a `tracing` subscriber to route `tracing` events
//!   through a [`Logger`], so they are rendered the same way as direct calls.
//!
//! Neither path blocks: a full channel drops the record and counts it.

use std::sync::atomic::{AtomicU64, Ordering};

use kvfmt::event::collect_event;
use tokio::sync::mpsc::{Sender, error::TrySendError};
use tracing::{Event, Level, Subscriber, debug, trace};
use tracing_subscriber::layer::{Context, Layer};

use crate::{Error, Logger, Record, Result, Sink};

/// Sink that sends each record over a bounded channel.
///
/// This is an optional sink for callers that display lines elsewhere. The
/// [`Logger`] itself always renders and delivers synchronously; only this
/// sink queues, and it never waits for room in the channel.
#[derive(Debug)]
pub struct ChannelSink {
    /// Sending half of the channel.
    tx: Sender<Record>,
    /// Count of records dropped due to a full channel.
    dropped: AtomicU64,
}

impl ChannelSink {
    /// Wrap the sending half of a channel.
    pub fn new(tx: Sender<Record>) -> Self {
        Self {
            tx,
            dropped: AtomicU64::new(0),
        }
    }

    /// Try to send a record without waiting.
    ///
    /// A full channel drops the record and still returns `Ok`; a closed
    /// channel returns [`Error::ChannelClosed`].
    pub fn try_forward(&self, record: Record) -> Result<()> {
        match self.tx.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Closed(_)) => Err(Error::ChannelClosed),
            Err(TrySendError::Full(_)) => {
                let n = self.dropped.fetch_add(1, Ordering::SeqCst) + 1;
                if n == 1 || n.is_multiple_of(1000) {
                    // Throttled to avoid log storms.
                    debug!(count = n, "log_channel_drop");
                }
                Ok(())
            }
        }
    }

    /// Number of records dropped because the channel was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::SeqCst)
    }
}

impl Sink for ChannelSink {
    fn log(&self, record: Record) {
        if let Err(err) = self.try_forward(record) {
            trace!(error = %err, "log_channel_closed");
        }
    }
}

/// Tracing layer that routes events into a [`Logger`].
///
/// `ERROR` events are logged as errors, everything else as info. An error
/// recorded under `err` or `error` becomes the leading `err` pair. Events
/// emitted by this crate are skipped so sink diagnostics cannot loop back
/// into the sink.
#[derive(Debug, Clone)]
pub struct LoggerLayer {
    /// Logger that receives the events.
    logger: Logger,
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if is_own_target(event.metadata().target()) {
            return;
        }
        let ev = collect_event(event);
        let level = if ev.level == Level::ERROR {
            "ERROR"
        } else {
            "INFO"
        };
        self.logger.emit(level, &ev.message, ev.error.as_ref(), &ev.fields);
    }
}

/// Does `target` belong to this crate?
fn is_own_target(target: &str) -> bool {
    target == env!("CARGO_CRATE_NAME")
        || target.starts_with(concat!(env!("CARGO_CRATE_NAME"), "::"))
}

/// Create a layer that routes `tracing` events into `logger`.
pub fn layer(logger: Logger) -> LoggerLayer {
    LoggerLayer { logger }
}
