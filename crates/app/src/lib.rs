//! Terminal front end for the Bestellblick dashboard.

pub mod app;
pub mod cli;
pub mod snapshot;
pub mod ui;

/// Install the global tracing subscriber, honouring `RUST_LOG`.
///
/// Logs go to stderr so they do not interleave with the dashboard's
/// terminal output; without `RUST_LOG` nothing is emitted.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
