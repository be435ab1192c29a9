//! Structured logging setup.
//!
//! The library only emits `tracing` events; the embedding server calls
//! `init` once to print them.

use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor the caller supplies one.
pub const DEFAULT_LEVEL: &str = "info";

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_level`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let _ = init(DEFAULT_LEVEL);
        assert!(!init("debug"));
    }
}
