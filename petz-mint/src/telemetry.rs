//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured level when set.

use petz_core::config::GeneralConfig;
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `config.log_level`.
#[must_use]
pub fn env_filter(config: &GeneralConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install a global fmt subscriber. Returns `false` if one was already
/// installed, which is not an error.
pub fn init_tracing(config: &GeneralConfig) -> bool {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(config));
    let installed = if config.log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}
