//! Logging setup for when the host loads us.
//!
//! The host has no idea about [`tracing`], so the plugin installs its own subscriber, writing to stderr.
//! The filter is read from the [`LOG_ENV`] environment variable, using the usual `EnvFilter` directive syntax.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `KCORR_LOG=kcorr_engine::sampler=trace`
pub const LOG_ENV: &str = "KCORR_LOG";
/// Filter used when [`LOG_ENV`] is missing or invalid
pub const DEFAULT_FILTER: &str = "warn";

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber, the first time it is called.
///
/// If something else (a test harness, or a host that also uses `tracing`) already installed a
/// global subscriber, that one is kept.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
