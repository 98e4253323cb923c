//! Tracing setup
//!
//! Logs go to stderr so command output on stdout stays machine-readable. Filtering follows
//! `RUST_LOG`:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=dsaa_client=info` - request dispatch/completion only

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the stderr subscriber (default level: `warn`)
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}
