use wasm_bindgen::prelude::*;

// Import modules
#[macro_use]
mod macros;

pub mod canvas;
mod command_executors;
pub mod components;
pub mod constants;
mod dom_utils;
pub mod editor;
pub mod graph;
pub mod messages;
pub mod models;
pub mod models_config;
pub mod network;
pub mod pages;
pub mod reducers;
pub mod router;
pub mod state;
mod toast;
pub mod update;

#[cfg(test)]
mod tests;

pub use network::init_api_config_js;

use crate::messages::Message;
use crate::state::dispatch_global_message;

/// Give the host page a moment to call `init_api_config_js` when no base URL
/// was baked in at compile time. Falls back to the default backend.
async fn wait_for_api_config() {
    use gloo_timers::future::TimeoutFuture;
    let started = js_sys::Date::now();
    while !network::is_configured() {
        if js_sys::Date::now() - started > constants::RUNTIME_CONFIG_WAIT_MS {
            debug_log!("No runtime API config, using {}", network::api_config().base_url());
            return;
        }
        TimeoutFuture::new(25).await;
    }
}

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    // Initialize API configuration before any network operations
    if let Err(e) = network::init_api_config() {
        debug_log!("API config not set at compile time ({}). Waiting for runtime config…", e);
    }

    let route = router::current_route();
    pages::mount(&route)?;

    wasm_bindgen_futures::spawn_local(async move {
        wait_for_api_config().await;
        dispatch_global_message(Message::RouteEntered(route));
    });

    Ok(())
}
