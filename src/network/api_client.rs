use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::endpoints::Endpoint;
use crate::models::{Agent, LoginRequest, Node, Project, Session};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("client misconfigured: {0}")]
    Config(String),
}

impl ApiError {
    /// Build the error for a response whose status was not the expected one.
    /// FastAPI puts the reason in `detail`, older handlers in `message`.
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        let from_body = serde_json::from_str::<Value>(body).ok().and_then(|json| {
            ["detail", "message"].iter().find_map(|key| match json.get(*key)? {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
        });
        let message = from_body.unwrap_or_else(|| {
            if status_text.is_empty() {
                "no details".to_string()
            } else {
                status_text.to_string()
            }
        });
        ApiError::Status { status, message }
    }

    fn from_js(err: JsValue) -> Self {
        ApiError::Network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
    }
}

/// Parse a response body, mapping serde failures to [`ApiError::Decode`].
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

// REST API Client for project / agent / node operations
pub struct ApiClient;

impl ApiClient {
    pub async fn get_project(project_id: &str) -> Result<Project, ApiError> {
        let body = Self::send(&Endpoint::GetProject(project_id.to_string()), None).await?;
        decode(&body)
    }

    pub async fn create_project(project: &Project) -> Result<Project, ApiError> {
        let body = Self::send(&Endpoint::CreateProject, Some(Self::encode(project)?)).await?;
        decode(&body)
    }

    pub async fn login(request: &LoginRequest) -> Result<Session, ApiError> {
        let body = Self::send(&Endpoint::Login, Some(Self::encode(request)?)).await?;
        decode(&body)
    }

    pub async fn get_agent(agent_id: &str) -> Result<Agent, ApiError> {
        let body = Self::send(&Endpoint::GetAgent(agent_id.to_string()), None).await?;
        decode(&body)
    }

    pub async fn create_agent(agent: &Agent) -> Result<Agent, ApiError> {
        let body = Self::send(&Endpoint::CreateAgent, Some(Self::encode(agent)?)).await?;
        decode(&body)
    }

    /// Trigger a backend run. The response is the run state, passed through
    /// untyped since the backend has not settled its shape.
    pub async fn run_agent(agent_id: &str) -> Result<Value, ApiError> {
        let body = Self::send(&Endpoint::RunAgent(agent_id.to_string()), None).await?;
        decode(&body)
    }

    pub async fn create_node(node: &Node) -> Result<Node, ApiError> {
        let body = Self::send(&Endpoint::CreateNode, Some(Self::encode(node)?)).await?;
        decode(&body)
    }

    fn encode<T: Serialize>(payload: &T) -> Result<String, ApiError> {
        serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send(endpoint: &Endpoint, body: Option<String>) -> Result<String, ApiError> {
        let url = super::api_url(&endpoint.path());
        crate::debug_log!("{} -> {}", endpoint, url);
        Self::fetch_json(&url, endpoint.method().as_str(), body.as_deref(), endpoint.expected_status()).await
    }

    // Helper function to make fetch requests
    pub async fn fetch_json(url: &str, method: &str, body: Option<&str>, expected_status: u16) -> Result<String, ApiError> {
        use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(ApiError::from_js)?;
        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
            headers
                .append("Content-Type", "application/json")
                .map_err(ApiError::from_js)?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts).map_err(ApiError::from_js)?;

        let window = web_sys::window().ok_or_else(|| ApiError::Config("no global window".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(ApiError::from_js)?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ApiError::Decode("fetch did not return a Response".into()))?;

        let text_promise = resp.text().map_err(ApiError::from_js)?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(ApiError::from_js)?
            .as_string()
            .unwrap_or_default();

        if resp.status() != expected_status {
            return Err(ApiError::from_response(resp.status(), &resp.status_text(), &text));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fastapi_detail_becomes_message() {
        let err = ApiError::from_response(500, "Internal Server Error", r#"{"detail":"Failed to create node"}"#);
        assert_eq!(err, ApiError::Status { status: 500, message: "Failed to create node".into() });
    }

    #[test]
    fn validation_detail_lists_are_kept_as_json() {
        let err = ApiError::from_response(422, "Unprocessable Entity", r#"{"detail":[{"loc":["body","name"]}]}"#);
        match err {
            ApiError::Status { status: 422, message } => assert!(message.contains("name")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_json_body_falls_back_to_status_text() {
        let err = ApiError::from_response(502, "Bad Gateway", "<html>");
        assert_eq!(err.to_string(), "request failed (502): Bad Gateway");
    }

    #[test]
    fn decode_errors_are_typed() {
        assert!(matches!(decode::<Agent>("not json"), Err(ApiError::Decode(_))));
    }
}
