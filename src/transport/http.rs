//! HTTP transport implementation
//!
//! This module provides the `reqwest` backed transport.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::traits::{HttpMethod, Transport, TransportResponse};
use crate::error::TransportError;
use crate::{Error, Result};

/// Options for [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(120_000),
            user_agent: format!("webdriver-session/{}", crate::VERSION),
            headers: HashMap::new(),
        }
    }
}

/// HTTP transport implementation
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(options: HttpOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&options.user_agent)
                .map_err(|e| Error::configuration(format!("Invalid user agent: {}", e)))?,
        );

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::configuration(format!("Invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::configuration(format!("Invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn map_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> std::result::Result<TransportResponse, TransportError> {
        debug!("[{}] {}", method, url);

        let request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        let request = match (method.has_body(), body) {
            (true, Some(body)) => request.json(&body),
            // POST endpoints without parameters still expect an empty object
            (true, None) => request.json(&serde_json::json!({})),
            (false, _) => request,
        };

        let response = request.send().await.map_err(Self::map_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(Self::map_error)?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| TransportError::Decode(format!("{} (HTTP {}): {}", e, status, text)))?
        };

        Ok(TransportResponse { status, body })
    }
}
