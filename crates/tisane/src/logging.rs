//! Subscriber setup for TISANE binaries.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable switching log output to JSON lines.
pub const LOG_JSON_ENV: &str = "TISANE_LOG_JSON";

/// Installs the global `tracing` subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Output goes to
/// stderr, as JSON when `TISANE_LOG_JSON=1`. Calling this again is a no-op.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = std::env::var(LOG_JSON_ENV).is_ok_and(|value| value == "1");

    if use_json {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
