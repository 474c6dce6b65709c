//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Safe to call more than once; only the first call installs the logger.
/// Tests and embedding hosts that bring their own `log` implementation can
/// skip this entirely.
pub fn init() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
