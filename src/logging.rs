//! Log output for the `lingo` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application. The CLI writes to stderr so stdout stays parseable.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive, e.g. `LINGO_LOG=lingo=debug`.
pub const LOG_ENV: &str = "LINGO_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "lingo=debug" } else { "warn" }
}

/// Build the filter: `LINGO_LOG` wins, otherwise `warn` (or `lingo=debug` with `-v`).
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let ansi = std::env::var_os("NO_COLOR").is_none();
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(ansi)
                .without_time(),
        )
        .try_init();
}
