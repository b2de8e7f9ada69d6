//! Installs the `tracing_subscriber` registry used by the server.
//!
//! Filtering follows `RUST_LOG`, for example:
//! ```bash
//! RUST_LOG=corridor=debug,tower_http=info
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the tracer, using tracing subscription.
/// Records emitted through `log` are forwarded into the same registry.
/// This is optional, not calling this function will simply
/// not log traces.
pub fn initialize_tracer() {
    let fmt_layer = tracing_subscriber::fmt::layer().compact();

    // Initialise tracing with subscribers and environment filter
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();
}
