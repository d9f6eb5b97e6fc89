//! Mock transport implementation for testing
//!
//! Scripted responses keyed by method and URL suffix, with every request
//! recorded for later assertions.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::traits::{HttpMethod, Transport, TransportResponse};
use crate::error::TransportError;

type MockResult = Result<TransportResponse, TransportError>;

/// A request seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Debug)]
struct Route {
    method: HttpMethod,
    suffix: String,
    responses: VecDeque<MockResult>,
}

/// Mock transport
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Create a new mock transport answering `{"value": null}` to everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL ends with `suffix`.
    ///
    /// Responses queued for the same route are served in order; the last one
    /// keeps being served once the queue is drained. Routes registered later
    /// take precedence.
    pub fn on(&self, method: HttpMethod, suffix: &str, response: TransportResponse) -> &Self {
        self.push(method, suffix, Ok(response))
    }

    /// Fail requests whose URL ends with `suffix`
    pub fn fail(&self, method: HttpMethod, suffix: &str, error: TransportError) -> &Self {
        self.push(method, suffix, Err(error))
    }

    fn push(&self, method: HttpMethod, suffix: &str, result: MockResult) -> &Self {
        let mut routes = lock(&self.routes);
        match routes
            .iter_mut()
            .find(|route| route.method == method && route.suffix == suffix)
        {
            Some(route) => route.responses.push_back(result),
            None => routes.push(Route {
                method,
                suffix: suffix.to_string(),
                responses: VecDeque::from([result]),
            }),
        }
        self
    }

    /// Every request sent so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// W3C create-session success envelope
    pub fn w3c_session(session_id: &str, capabilities: Value) -> TransportResponse {
        TransportResponse::new(
            200,
            json!({
                "value": {
                    "sessionId": session_id,
                    "capabilities": capabilities
                }
            }),
        )
    }

    /// JSONWire create-session success envelope
    pub fn legacy_session(session_id: &str, capabilities: Value) -> TransportResponse {
        TransportResponse::new(
            200,
            json!({
                "sessionId": session_id,
                "status": 0,
                "value": capabilities
            }),
        )
    }

    /// Command success envelope
    pub fn value(value: Value) -> TransportResponse {
        TransportResponse::new(200, json!({ "value": value }))
    }

    /// W3C error envelope
    pub fn error(status: u16, error: &str, message: &str) -> TransportResponse {
        TransportResponse::new(
            status,
            json!({
                "value": {
                    "error": error,
                    "message": message,
                    "stacktrace": ""
                }
            }),
        )
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, method: HttpMethod, url: &str, body: Option<Value>) -> MockResult {
        lock(&self.requests).push(RecordedRequest {
            method,
            url: url.to_string(),
            body,
        });

        let mut routes = lock(&self.routes);
        let route = routes
            .iter_mut()
            .rev()
            .find(|route| route.method == method && url.ends_with(&route.suffix));

        match route {
            Some(route) if route.responses.len() > 1 => route
                .responses
                .pop_front()
                .unwrap_or_else(|| Ok(Self::value(Value::Null))),
            Some(route) => route
                .responses
                .front()
                .cloned()
                .unwrap_or_else(|| Ok(Self::value(Value::Null))),
            None => Ok(Self::value(Value::Null)),
        }
    }
}
