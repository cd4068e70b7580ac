//! `tracing` subscriber setup for tests.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, prelude::*};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_CONFIG: &str = "warn";

/// Global flag to track if logging has been initialized.
static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Build the filter from `RUST_LOG`, defaulting to `warn` when it is unset
/// or does not parse.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_CONFIG.into())
}

/// Install a global subscriber that prints through the test harness's
/// captured output, filtered by [`env_filter`]. Safe to call from every
/// test; only the first call has an effect.
pub fn init_for_tests() {
    LOGGING_INITIALIZED.get_or_init(|| {
        let _ignored = tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().without_time().with_test_writer())
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn default_filter_is_warn() {
        if env::var_os("RUST_LOG").is_none() {
            assert_eq!(env_filter().to_string(), "warn");
        }
    }

    #[test]
    fn init_is_idempotent() {
        init_for_tests();
        init_for_tests();
        assert!(LOGGING_INITIALIZED.get().is_some());
    }
}
