//! `tracing-subscriber` initialization.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::{Config, LogFormat};

/// Build the log filter: `RUST_LOG` wins, then the configured level.
fn filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global subscriber.
///
/// Returns an error if a subscriber is already installed.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let registry = Registry::default().with(filter(config));

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    // The only test in this crate that installs the global subscriber.
    #[test]
    #[serial]
    fn test_init_installs_once() {
        let config = Config::default_for_test();
        assert!(init(&config).is_ok());
        assert!(init(&config).is_err());
    }
}
