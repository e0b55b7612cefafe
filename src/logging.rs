//! Tracing Bootstrap
//!
//! Convenience initializer for binaries and test harnesses embedding the
//! engine. Library code only emits `tracing` events; installing a
//! subscriber stays the embedder's choice.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a fmt subscriber honoring `RUST_LOG`, falling back to the given
/// default filter (e.g. `"veriscan=info"`).
///
/// Safe to call once per process; subsequent calls return an error from the
/// subscriber registry and are ignored here.
pub fn init(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
