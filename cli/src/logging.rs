//! Diagnostic logging, off unless `RUST_LOG` is set.
//!
//! stdout carries the status line and the JSON body, so the subscriber
//! always writes to stderr.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the global subscriber when `RUST_LOG` is present.
/// Returns whether a subscriber was installed.
pub fn init_tracing() -> bool {
    if std::env::var_os("RUST_LOG").is_none() {
        return false;
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let init_result = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer)
        .try_init();

    if let Err(err) = init_result {
        tracing::warn!(error = %err, "tracing already initialized; skipping env tracing setup");
    }
    true
}
