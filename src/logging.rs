//! Logging setup
//!
//! The crate itself only talks to the `log` facade. Hosts that don't bring their
//! own logger can install `env_logger` through here.

use env_logger::{Builder, Env};

/// Install `env_logger` with `default_filter`, unless `RUST_LOG` overrides it.
///
/// Returns false when a logger was already installed; calling this twice is harmless.
pub fn init_logging(default_filter: &str) -> bool {
    let installed = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok();
    if installed {
        log::debug!("Logging initialized (default filter: {})", default_filter);
    }
    installed
}
