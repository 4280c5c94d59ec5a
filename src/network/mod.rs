// Re-export network modules
pub mod api_client;
pub mod config;
pub mod endpoints;

// Re-export commonly used items
pub use api_client::{ApiClient, ApiError};
pub use endpoints::Endpoint;

use config::{ApiConfig, RuntimeConfig};
use lazy_static::lazy_static;
use std::sync::RwLock;
use wasm_bindgen::prelude::*;

lazy_static! {
    static ref API_CONFIG: RwLock<Option<ApiConfig>> = RwLock::new(None);
}

fn store_config(config: ApiConfig) {
    match API_CONFIG.write() {
        Ok(mut guard) => *guard = Some(config),
        Err(poisoned) => *poisoned.into_inner() = Some(config),
    }
}

/// Initialize the API configuration from the compile-time `API_BASE_URL`.
/// Falls back to the local development backend when it is not set.
pub fn init_api_config() -> Result<(), &'static str> {
    let config = ApiConfig::new()?;
    store_config(config);
    Ok(())
}

/// Initialize the API configuration from the host page, e.g.
/// `init_api_config_js({ apiBaseUrl: "https://agents.example.com" })`.
#[wasm_bindgen]
pub fn init_api_config_js(config: JsValue) -> Result<(), JsValue> {
    let runtime: RuntimeConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("invalid api config: {}", e)))?;
    crate::debug_log!("Initializing API config from JS: {}", runtime.api_base_url);
    store_config(ApiConfig::from_url(&runtime.api_base_url));
    Ok(())
}

/// Whether a base URL was stored, at compile time or by the host page.
pub fn is_configured() -> bool {
    match API_CONFIG.read() {
        Ok(guard) => guard.is_some(),
        Err(poisoned) => poisoned.into_inner().is_some(),
    }
}

/// The configured API settings, or the defaults if nothing was stored.
pub fn api_config() -> ApiConfig {
    let guard = match API_CONFIG.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.clone().unwrap_or_default()
}

/// Absolute URL for an API path.
pub(crate) fn api_url(path: &str) -> String {
    api_config().url(path)
}
