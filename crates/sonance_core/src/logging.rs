//! Logging setup
//!
//! Every crate logs through `tracing`; hosts call [`init`] once at startup
//! to get formatted output.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset and the caller passes none
pub const DEFAULT_LOG_FILTER: &str = "sonance=debug";

/// Install a `fmt` subscriber
///
/// `RUST_LOG` wins over `filter`. Returns `false` if a global subscriber
/// was already set, which is not an error.
pub fn init(filter: Option<&str>) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_LOG_FILTER)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
