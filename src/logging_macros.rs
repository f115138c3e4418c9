//! Logging macros that prefix every message with `[file:module:line]`.
//!
//! - `log_*!` writes through both `log` and `tracing`
//! - `trace_*!` writes through `tracing` only
//!
//! Example output:
//!   `[src/app/termui/app/shell.rs:guiterm::app::termui::app::shell:11] Shell 'sh -i' running as pid 4242`
//!
//! Keep debug logging out of per-frame code paths. Shell output is polled every frame, so only
//! state changes (spawn, exit, commands sent) are logged.

#[doc(hidden)]
#[macro_export]
macro_rules! __located {
    ($($arg:tt)*) => {
        format!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        let message = $crate::__located!($($arg)*);
        log::debug!("{}", message);
        tracing::debug!("{}", message);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let message = $crate::__located!($($arg)*);
        log::info!("{}", message);
        tracing::info!("{}", message);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let message = $crate::__located!($($arg)*);
        log::warn!("{}", message);
        tracing::warn!("{}", message);
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = $crate::__located!($($arg)*);
        log::error!("{}", message);
        tracing::error!("{}", message);
    }};
}

#[macro_export]
macro_rules! trace_debug {
    ($($arg:tt)*) => {
        tracing::debug!("{}", $crate::__located!($($arg)*))
    };
}

#[macro_export]
macro_rules! trace_info {
    ($($arg:tt)*) => {
        tracing::info!("{}", $crate::__located!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_located_prefix_names_this_file() {
        let message = crate::__located!("value {}", 7);
        assert!(message.starts_with("[src/logging_macros.rs:guiterm::logging_macros::tests:"));
        assert!(message.ends_with("] value 7"));
    }
}
