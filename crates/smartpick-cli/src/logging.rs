use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `smartpick_lib=debug`).
pub const LOG_ENV: &str = "SMARTPICK_LOG";

/// Set to `json` for JSON-lines output.
pub const LOG_FORMAT_ENV: &str = "SMARTPICK_LOG_FORMAT";

/// Install the global tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays clean. Defaults to
/// `warn` when [`LOG_ENV`] is unset or invalid.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = result {
        eprintln!("Failed to initialise logging: {err}");
    }
}
