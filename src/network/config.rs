use serde::Deserialize;

use crate::constants::DEFAULT_API_BASE_URL;

/// API route configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    /// Points at the local development backend. Used until
    /// `init_api_config()` or `init_api_config_js()` stores something else,
    /// and by unit tests that never run the bootstrap sequence.
    fn default() -> Self {
        Self::from_url(DEFAULT_API_BASE_URL)
    }
}

/// Shape of the object passed to `init_api_config_js` from the host page.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    #[serde(alias = "apiBaseUrl")]
    pub api_base_url: String,
}

impl ApiConfig {
    /// Read the `API_BASE_URL` baked in at compile time, if any.
    pub fn new() -> Result<Self, &'static str> {
        option_env!("API_BASE_URL")
            .map(Self::from_url)
            .ok_or("API_BASE_URL environment variable is not set")
    }

    /// Create a new ApiConfig from a URL string
    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL for all API calls
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a path below the base, e.g. `/api/v1/agent?id=1`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let cfg = ApiConfig::from_url("https://agents.example.com/ ");
        assert_eq!(cfg.url("/project"), "https://agents.example.com/project");
    }

    #[test]
    fn default_targets_local_backend() {
        assert_eq!(ApiConfig::default().base_url(), "http://localhost:8000");
    }

    #[test]
    fn runtime_config_accepts_camel_case() {
        let cfg: RuntimeConfig = serde_json::from_str(r#"{"apiBaseUrl":"http://api:9000"}"#).unwrap();
        assert_eq!(cfg.api_base_url, "http://api:9000");
    }
}
