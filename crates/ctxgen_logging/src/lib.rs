#![deny(missing_docs)]
//! Logging front for the `ctxgen` crates.
//!
//! Library code never names `log::*` directly; it goes through `ctx_*` so the
//! facade stays swappable. Level usage across the workspace:
//!
//! - `ctx_error!`: the process lost an input source (stdin read failure).
//! - `ctx_warn!`: work was dropped, such as undelivered tracking at shutdown.
//! - `ctx_info!`: configuration and request lifecycle.
//! - `ctx_debug!`: failures that are swallowed or reported elsewhere.
//! - `ctx_trace!`: per-event chatter (tracking commands on the engine thread).
//!
//! The binary installs the real logger; tests call [`initialize_for_tests`].

/// `log::trace!` under the workspace prefix.
#[macro_export]
macro_rules! ctx_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// `log::debug!` under the workspace prefix.
#[macro_export]
macro_rules! ctx_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// `log::info!` under the workspace prefix.
#[macro_export]
macro_rules! ctx_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// `log::warn!` under the workspace prefix.
#[macro_export]
macro_rules! ctx_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// `log::error!` under the workspace prefix.
#[macro_export]
macro_rules! ctx_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Routes log output to the test harness terminal, uncolored.
///
/// Debug builds log at debug level, release builds at info. Repeated calls
/// are harmless: only the first logger installed wins.
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
        ColorChoice::Never,
    )]);
}
