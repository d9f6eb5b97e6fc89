//! Common test utilities
//!
//! Shared helpers for integration tests that drive the real HTTP transport.

#![allow(dead_code)]

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use webdriver_session::capabilities::CapabilitySpec;
use webdriver_session::connection::{ConnectionInfo, Protocol};
use webdriver_session::logging::RecordingLogConfigurator;
use webdriver_session::protocol::CommandRegistry;
use webdriver_session::transport::{HttpOptions, HttpTransport};
use webdriver_session::WebDriverClient;

/// Connection info for a mock driver on localhost
pub fn local_connection(port: u16) -> ConnectionInfo {
    ConnectionInfo::new(Protocol::Http, "127.0.0.1", port, "/")
}

/// Client over a real HTTP transport and a recording log configurator
pub fn create_http_client() -> (WebDriverClient, Arc<RecordingLogConfigurator>) {
    let transport = HttpTransport::new(HttpOptions {
        timeout: Duration::from_secs(5),
        ..Default::default()
    })
    .expect("Failed to create HTTP transport");
    let logging = Arc::new(RecordingLogConfigurator::new());

    let client = WebDriverClient::new(
        Arc::new(transport),
        CommandRegistry::standard(),
        logging.clone(),
    );
    (client, logging)
}

/// Capability spec from a JSON literal
pub fn capabilities(value: Value) -> CapabilitySpec {
    CapabilitySpec::from_value(value).expect("Invalid capabilities")
}
