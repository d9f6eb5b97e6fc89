//! Connection info and direct-connect resolution
//!
//! A session targets exactly one `{protocol, hostname, port, path}` endpoint.
//! Automation backends that proxy the handshake through a gateway advertise the
//! node that should receive the rest of the traffic through `directConnect*`
//! capabilities; [`resolve`] applies that redirect.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::{Error, Result};

/// URL scheme of a WebDriver endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    fn default_port(self) -> u16 {
        match self {
            Protocol::Http => 80,
            Protocol::Https => 443,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => f.write_str("http"),
            Protocol::Https => f.write_str("https"),
        }
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(Error::configuration(format!("Unknown protocol: {}", other))),
        }
    }
}

/// Endpoint every request of a session is sent to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub protocol: Protocol,
    pub hostname: String,
    pub port: u16,
    pub path: String,
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            protocol: Protocol::Http,
            hostname: "localhost".to_string(),
            port: 4444,
            path: "/".to_string(),
        }
    }
}

impl ConnectionInfo {
    /// Create connection info, normalizing the path to start with `/`
    pub fn new<H: Into<String>, P: Into<String>>(
        protocol: Protocol,
        hostname: H,
        port: u16,
        path: P,
    ) -> Self {
        Self {
            protocol,
            hostname: hostname.into(),
            port,
            path: normalize_path(&path.into()),
        }
    }

    /// Parse a `scheme://host[:port][/path]` URL
    pub fn from_url(url: &str) -> Result<Self> {
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| Error::configuration(format!("Invalid endpoint URL: {}", url)))?;
        let protocol: Protocol = scheme.parse()?;

        let end = rest
            .find(|c: char| matches!(c, '/' | '?' | '#'))
            .unwrap_or(rest.len());
        let (authority, tail) = rest.split_at(end);
        let path = match tail.find(|c: char| matches!(c, '?' | '#')) {
            Some(idx) => &tail[..idx],
            None => tail,
        };
        let path = if path.is_empty() { "/" } else { path };

        // an IPv6 literal only has a port after its closing bracket
        let separator = match authority.rfind(']') {
            Some(close) => authority[close..].find(':').map(|idx| close + idx),
            None => authority.rfind(':'),
        };

        let (hostname, port) = match separator {
            Some(idx) => {
                let port = authority[idx + 1..]
                    .parse()
                    .map_err(|_| Error::configuration(format!("Invalid port in URL: {}", url)))?;
                (&authority[..idx], port)
            }
            None => (authority, protocol.default_port()),
        };

        if hostname.is_empty() {
            return Err(Error::configuration(format!("Missing host in URL: {}", url)));
        }

        Ok(Self::new(protocol, hostname, port, path))
    }

    /// Base URL without a trailing slash, e.g. `http://localhost:4444/wd/hub`
    pub fn base_url(&self) -> String {
        let path = self.path.trim_end_matches('/');
        format!("{}://{}:{}{}", self.protocol, self.hostname, self.port, path)
    }

    /// Full URL for an endpoint such as `/session`
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url(), endpoint.trim_start_matches('/'))
    }
}

impl fmt::Display for ConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url())
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Caller- or server-supplied direct-connect bundle.
///
/// Every field is optional; missing fields fall back to the base connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectConnect {
    pub protocol: Option<Protocol>,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub path: Option<String>,
}

impl DirectConnect {
    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self.protocol.is_none() && self.hostname.is_none() && self.port.is_none() && self.path.is_none()
    }

    /// Whether all four fields are present
    pub fn is_complete(&self) -> bool {
        self.protocol.is_some() && self.hostname.is_some() && self.port.is_some() && self.path.is_some()
    }

    /// Read `directConnect*` fields (plain or `appium:` prefixed) from a capability map
    pub fn from_capabilities(capabilities: &Map<String, Value>) -> Self {
        let field = |name: &str| {
            capabilities
                .get(name)
                .or_else(|| capabilities.get(&format!("appium:{}", name)))
        };

        Self {
            protocol: field("directConnectProtocol")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok()),
            hostname: field("directConnectHost")
                .and_then(Value::as_str)
                .map(str::to_string),
            port: field("directConnectPort").and_then(|v| match v {
                Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
                Value::String(s) => s.parse().ok(),
                _ => None,
            }),
            path: field("directConnectPath")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Apply this bundle on top of `base`, producing a brand-new value
    pub fn apply(&self, base: &ConnectionInfo) -> ConnectionInfo {
        ConnectionInfo::new(
            self.protocol.unwrap_or(base.protocol),
            self.hostname.clone().unwrap_or_else(|| base.hostname.clone()),
            self.port.unwrap_or(base.port),
            self.path.clone().unwrap_or_else(|| base.path.clone()),
        )
    }
}

/// Resolve the endpoint subsequent commands must target.
///
/// Returns `base` unless the returned capabilities carry direct-connect fields.
pub fn resolve(base: &ConnectionInfo, returned_capabilities: &Map<String, Value>) -> ConnectionInfo {
    let direct = DirectConnect::from_capabilities(returned_capabilities);
    if direct.is_empty() {
        return base.clone();
    }

    let resolved = direct.apply(base);
    info!("Found direct connect information, redirecting session traffic to {}", resolved);
    resolved
}
