//! The REST surface this client talks to.
//!
//! Paths, methods and the status each call must answer with live in one
//! table so the fetch helper stays generic. Note that project creation and
//! login are mounted outside the `/api/v1` prefix on the backend.

use std::fmt;

use crate::constants::API_V1_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    GetAgent(String),
    CreateAgent,
    RunAgent(String),
    GetProject(String),
    CreateProject,
    CreateNode,
    Login,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::GetAgent(_) | Endpoint::GetProject(_) => Method::Get,
            _ => Method::Post,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::GetAgent(id) => format!("{}/agent?id={}", API_V1_PREFIX, encode_query(id)),
            Endpoint::CreateAgent => format!("{}/agent", API_V1_PREFIX),
            Endpoint::RunAgent(id) => format!("{}/agent/run?id={}", API_V1_PREFIX, encode_query(id)),
            Endpoint::GetProject(id) => format!("{}/project?id={}", API_V1_PREFIX, encode_query(id)),
            Endpoint::CreateProject => "/project".to_string(),
            Endpoint::CreateNode => format!("{}/node", API_V1_PREFIX),
            Endpoint::Login => "/auth/login".to_string(),
        }
    }

    /// The only status treated as success.
    pub fn expected_status(&self) -> u16 {
        match self {
            Endpoint::CreateAgent | Endpoint::CreateNode | Endpoint::RunAgent(_) => 201,
            _ => 200,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method().as_str(), self.path())
    }
}

/// Percent-encode a query value (RFC 3986 unreserved characters pass).
fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versioned_and_unversioned_paths() {
        assert_eq!(Endpoint::GetAgent("665f".into()).path(), "/api/v1/agent?id=665f");
        assert_eq!(Endpoint::CreateNode.path(), "/api/v1/node");
        assert_eq!(Endpoint::CreateProject.path(), "/project");
        assert_eq!(Endpoint::Login.path(), "/auth/login");
    }

    #[test]
    fn create_calls_expect_their_documented_status() {
        assert_eq!(Endpoint::CreateAgent.expected_status(), 201);
        assert_eq!(Endpoint::CreateNode.expected_status(), 201);
        assert_eq!(Endpoint::CreateProject.expected_status(), 200);
        assert_eq!(Endpoint::Login.expected_status(), 200);
        assert_eq!(Endpoint::GetProject("1".into()).method(), Method::Get);
    }

    #[test]
    fn ids_are_query_encoded() {
        assert_eq!(Endpoint::GetProject("a b&c".into()).path(), "/api/v1/project?id=a%20b%26c");
    }
}
