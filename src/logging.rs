//! Logging macros for the router mock
//!
//! Every macro forwards to the `log` crate (feature `log`, on by default) or
//! to `tracing` (feature `tracing`). Enable exactly one of them; with neither
//! enabled the macros expand to nothing.
//!
//! Levels used inside the crate:
//!
//! - `trace` - segment-by-segment matching and cache lookups
//! - `debug` - every navigation (`push`, `replace`, `go`)
//! - `info` - router construction
//! - `warn` - echo fallbacks for unknown paths/names, duplicate route names
//!
//! # Usage
//!
//! ```ignore
//! use router_mock::{debug_log, warn_log};
//!
//! debug_log!("push '{}'", full_path);
//! warn_log!("no route matches '{}'", path);
//! ```

/// Trace-level logging
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// Info-level logging
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Warn-level logging
///
/// The mock never fails a navigation, so this is where unresolvable
/// targets get reported.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// Error-level logging
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}
