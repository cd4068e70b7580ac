//! Channel sink and `tracing` bridge behavior.

use std::{error::Error as StdError, io, sync::Arc};

use testlogger::{
    CaptureSink, Error, Logger, Record,
    forward::{ChannelSink, layer},
    kvs,
};
use tokio::sync::mpsc::channel;
use tracing_subscriber::prelude::*;

/// Run `f` with a subscriber that forwards into a capture sink through a
/// logger named `tr`, configured by `build`.
fn with_layer(build: impl FnOnce(Logger) -> Logger, f: impl FnOnce()) -> Vec<String> {
    let sink = Arc::new(CaptureSink::new());
    let logger = build(Logger::from_arc(sink.clone()).with_name("tr"));
    let subscriber = tracing_subscriber::registry().with(layer(logger));
    tracing::subscriber::with_default(subscriber, f);
    sink.lines()
}

#[test]
fn channel_sink_forwards_and_drops_when_full() {
    let (tx, mut rx) = channel::<Record>(2);
    let sink = Arc::new(ChannelSink::new(tx));
    let logger = Logger::from_arc(sink.clone());

    logger.info("one", &kvs!["n", 1]);
    logger.info("two", &[]);
    logger.info("three", &[]);

    match rx.try_recv() {
        Ok(r) => assert_eq!(r.to_string(), "INFO one n=1"),
        other => panic!("expected forwarded record, got: {:?}", other),
    }
    assert_eq!(rx.try_recv().map(|r| r.message).ok().as_deref(), Some("two"));
    assert!(rx.try_recv().is_err());
    assert_eq!(sink.dropped(), 1);
}

#[test]
fn channel_sink_reports_closed() {
    let (tx, rx) = channel::<Record>(1);
    drop(rx);
    let sink = ChannelSink::new(tx);
    let record = Record {
        level: "INFO",
        prefix: None,
        message: "gone".to_string(),
        fields: None,
    };
    assert!(matches!(sink.try_forward(record), Err(Error::ChannelClosed)));

    // Logging through a closed channel is silent.
    Logger::new(sink).info("still fine", &[]);
}

#[test]
fn layer_renders_typed_fields() {
    let lines = with_layer(
        |l| l,
        || tracing::info!(pod = "x", count = 3, ready = true, "hello"),
    );
    assert_eq!(lines, [r#"INFO tr: hello pod="x" count=3 ready=true"#]);
}

#[test]
fn layer_debug_fields_are_unquoted() {
    let lines = with_layer(|l| l, || tracing::warn!(state = ?vec![1, 2], "odd"));
    assert_eq!(lines, ["INFO tr: odd state=[1, 2]"]);
}

#[test]
fn layer_error_events_lead_with_err() {
    let err = io::Error::other("disk full");
    let lines = with_layer(
        |l| l,
        || {
            tracing::error!(
                error = &err as &(dyn StdError + 'static),
                path = "/tmp/x",
                "write failed"
            )
        },
    );
    assert_eq!(
        lines,
        [r#"ERROR tr: write failed err="disk full" path="/tmp/x""#]
    );
}

#[test]
fn layer_event_fields_override_context() {
    let lines = with_layer(
        |l| l.with_values(&kvs!["pod", "nginx", "ns", "default"]),
        || tracing::info!(pod = "busybox", "started"),
    );
    assert_eq!(lines, [r#"INFO tr: started ns="default" pod="busybox""#]);
}

#[test]
fn layer_skips_own_events() {
    let lines = with_layer(
        |l| l,
        || {
            tracing::debug!(target: "testlogger::sink", count = 1, "sink_write_drop");
            tracing::info!(target: "testlogger_other", "kept");
        },
    );
    assert_eq!(lines, ["INFO tr: kept"]);
}
