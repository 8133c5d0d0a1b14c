//! provides logging helpers

use tracing_subscriber::filter::{self, LevelFilter};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

/// Level used when `RUST_LOG` is not set
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// initiate the global tracing subscriber
///
/// Logs go to stderr so they never mix with a payload printed on stdout.
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init(verbose: bool) {
    let env_filter = filter::EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .from_env_lossy();

    let fmt_layer = layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter);

    let _ = registry().with(fmt_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true), LevelFilter::DEBUG);
        assert_eq!(default_level(false), LevelFilter::WARN);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
