#![deny(missing_docs)]
//! Shared logging utilities for the critique workspace.
//!
//! This crate provides the `critique_*` logging macros used by the core,
//! engine and app crates, and a minimal test initializer for the global logger.

/// Log target used by the macros so scan activity can be filtered as a unit.
pub const TARGET: &str = "critique";

/// Logs a trace-level message under the shared critique target.
#[macro_export]
macro_rules! critique_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the shared critique target.
#[macro_export]
macro_rules! critique_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the shared critique target.
#[macro_export]
macro_rules! critique_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the shared critique target.
#[macro_export]
macro_rules! critique_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the shared critique target.
#[macro_export]
macro_rules! critique_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
