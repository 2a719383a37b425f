use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr subscriber used by the binary.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Stdout is left to the
/// sink's own output.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}
