//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter (e.g. `debug`,
/// `stratus_provider=trace`).
pub const LOG_FILTER_VAR: &str = "STRATUS_LOG";

/// Initialize the global subscriber.
///
/// Logs go to stderr so stdout stays clean for the output mapping. JSON
/// formatting is for CI log collectors.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
