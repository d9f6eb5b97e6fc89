//! Transport layer traits
//!
//! This module defines the abstract interface the session core uses to reach
//! a remote end.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::error::TransportError;

/// HTTP method of a WebDriver endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    /// Whether requests with this method carry a JSON body
    pub fn has_body(self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
            HttpMethod::Delete => f.write_str("DELETE"),
        }
    }
}

/// Response as seen by the session core
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body, `Value::Null` when empty
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport trait
///
/// Executes one request/response round trip. Retries, proxying and timeouts
/// belong to implementations; the session core surfaces whatever they report.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send a request and wait for the response
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> Result<TransportResponse, TransportError>;
}
