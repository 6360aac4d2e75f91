//! `log_*!` macros. Context values may be any `Display` type.

/// Formats `key => value` pairs into owned strings, then borrows them
#[doc(hidden)]
#[macro_export]
macro_rules! __signal_log_context {
    ($($key:expr => $value:expr),*) => {
        vec![$(($key, format!("{}", $value))),*]
    };
}

/// Error event with a code, an optional `span = ...` and optional context
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {{
        let owned: Vec<(&str, String)> = $crate::__signal_log_context!($($key => $value),+);
        let pairs = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
        $crate::logging::log_error_with_context($code, $message, None, pairs)
    }};

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {{
        let owned: Vec<(&str, String)> = $crate::__signal_log_context!($($key => $value),+);
        let pairs = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
        $crate::logging::log_error_with_context($code, $message, Some($span), pairs)
    }};
}

/// Stage-completion event carrying a success code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {{
        let owned: Vec<(&str, String)> = $crate::__signal_log_context!($($key => $value),+);
        let pairs = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
        $crate::logging::log_success_with_context($code, $message, pairs)
    }};
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {{
        let owned: Vec<(&str, String)> = $crate::__signal_log_context!($($key => $value),+);
        let pairs = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
        $crate::logging::log_info_with_context($message, pairs)
    }};
}

/// Debug event; nothing is formatted unless the minimum level admits debug
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)*) => {{
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            #[allow(unused_mut)]
            let mut event = $crate::logging::LogEvent::debug($message);
            $(
                event = event.with_context($key, &format!("{}", $value));
            )*
            $crate::logging::dispatch_event(event)
        }
    }};
}
