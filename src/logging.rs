//! Logging for the uplink envelope layer and the decoder CLI.
//!
//! Thin wrappers over the `log` facade backed by `env_logger`. The
//! decoder itself only emits debug lines on its defined no-op branches;
//! undecodable uplinks are reported here at warn level by the envelope
//! layer.

use log::{debug, error, info, log_enabled, warn, Level};

/// Initializes the logger with the `env_logger` crate.
pub fn init_logger() {
    env_logger::init();
}

/// Logs a message at error level.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs a message at warn level.
pub fn log_warn(message: &str) {
    if log_enabled!(Level::Warn) {
        warn!("{message}");
    }
}

/// Logs a message at info level.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a message at debug level.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}
