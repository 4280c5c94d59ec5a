//! Small crate-wide convenience macros.

/// Log to the browser console in debug builds.
///
/// Compiles to nothing on release builds and on native targets, so reducers
/// and other pure code can log without touching `web_sys` during `cargo test`.
///
/// ```rust,ignore
/// debug_log!("Loaded agent {} with {} nodes", agent.id, agent.nodes.len());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(all(debug_assertions, target_arch = "wasm32"))]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(all(debug_assertions, target_arch = "wasm32")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log an error to the browser console (all build profiles).
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::error_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
