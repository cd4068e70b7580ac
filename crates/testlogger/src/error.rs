//! Error types for sinks.

use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for the testlogger crate.
pub type Result<T> = StdResult<T, Error>;

/// Failures reported by sinks when delivering a record.
///
/// The [`Logger`](crate::Logger) never surfaces these; sinks expose them
/// through their own fallible methods.
#[derive(Debug, Error)]
pub enum Error {
    /// Writing a line to the underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The receiving end of a channel sink has been dropped.
    #[error("log channel closed")]
    ChannelClosed,
}
