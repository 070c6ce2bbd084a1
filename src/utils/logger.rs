use std::env;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Installs the global `tracing` subscriber once per process.
///
/// The filter comes from `LOGLEVEL` (e.g. `debug`, `ig_graph_client=trace`),
/// defaulting to `info`. Later calls are no-ops, so tests can call it freely.
pub fn setup_logger() {
    INIT.call_once(|| {
        let level = env::var("LOGLEVEL").unwrap_or_else(|_| "info".to_string());
        let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!("Global subscriber already installed");
        }
    });
}
