#![deny(missing_docs)]
//! Shared logging utilities for the resume parser workspace.
//!
//! Every crate logs through the `engine_*` macros so the backend can be
//! swapped in one place. Output goes through the `log` facade; the app and
//! the tests install a `simplelog` backend.

use log::LevelFilter;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Default verbosity: debug in debug builds, info in release builds.
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes a terminal logger for use in tests.
///
/// Safe to call from many tests; only the first call installs a logger.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let _ = CombinedLogger::init(vec![TermLogger::new(
        default_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
