//! Telemetry helpers for structured logging and tracing.
//!
//! The scheduler emits `tracing` events with `pgid`/`osd`/`level` fields and
//! never carries a logging context through its API.

/// Initialize tracing/telemetry. Users can install their own subscriber; this
/// helper installs a default `RUST_LOG`-driven subscriber if none is set.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
