//! Logging setup for the binaries.
//!
//! Logs go to stderr so stdout stays clean for JSON output and the stdio
//! server. `ASTRO_LOG` (or `RUST_LOG`) overrides the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Environment variable with a tracing filter directive
pub const LOG_ENV: &str = "ASTRO_LOG";

/// Map `-v` repetitions to a default filter.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "astro_guide=warn",
        1 => "astro_guide=info",
        2 => "astro_guide=debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
