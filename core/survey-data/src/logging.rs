//! FILENAME: core/survey-data/src/logging.rs
// PURPOSE: Category-tagged logging shared by the survey crates.
// CONTEXT: Lines keep the unified `seq|category|message` shape and are handed
// to the `log` facade with the category as target. Hosts install the logger.

use std::fmt;

pub use log::Level;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global sequence counter, so lines from different categories can be re-ordered.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Write a log line in unified format
pub fn write_log(level: Level, category: &str, message: fmt::Arguments<'_>) {
    if !log::log_enabled!(target: category, level) {
        return;
    }
    let seq = next_seq();
    log::log!(target: category, level, "{}|{}|{}", seq, category, message);
}

/// Write an ENTER log line for function entry
pub fn write_log_enter(level: Level, category: &str, func_name: &str, params: fmt::Arguments<'_>) {
    write_log(level, category, format_args!("ENTER {} {}", func_name, params));
}

/// Write an EXIT log line for function exit
pub fn write_log_exit(level: Level, category: &str, func_name: &str, result: fmt::Arguments<'_>) {
    write_log(level, category, format_args!("EXIT {} {}", func_name, result));
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Debug, $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Info, $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Warn, $cat, format_args!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter($crate::logging::Level::Debug, $cat, $func, format_args!(""))
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter($crate::logging::Level::Debug, $cat, $func, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit($crate::logging::Level::Debug, $cat, $func, format_args!(""))
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit($crate::logging::Level::Debug, $cat, $func, format_args!($($arg)*))
    };
}
