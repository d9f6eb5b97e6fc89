//! Create-session response envelopes

use serde_json::{Map, Value};

use crate::capabilities::CapabilityMap;
use crate::{Error, Result};

/// Legacy top-level fields that are not capabilities
const LEGACY_ENVELOPE_FIELDS: &[&str] = &["sessionId", "status", "value", "state", "class", "hCode"];

/// Successful create-session response, resolved once per handshake
#[derive(Debug, Clone, PartialEq)]
pub enum HandshakeResponse {
    /// `{ "value": { "sessionId": .., "capabilities": {..} } }`
    W3c {
        session_id: String,
        capabilities: CapabilityMap,
    },
    /// `{ "sessionId": .., "status": 0, "value": {..} }`
    Legacy {
        session_id: String,
        capabilities: CapabilityMap,
    },
}

impl HandshakeResponse {
    /// Classify a create-session response.
    ///
    /// Error envelopes and responses without a usable session id become
    /// [`Error::HandshakeProtocol`] carrying the full body.
    pub fn parse(status: u16, body: &Value) -> Result<Self> {
        if let Some(message) = error_message(status, body) {
            return Err(Error::handshake_protocol(message, body.clone()));
        }

        let value = body.get("value");

        if let Some(capabilities) = value
            .and_then(|v| v.get("capabilities"))
            .and_then(Value::as_object)
        {
            let session_id = value
                .and_then(|v| v.get("sessionId"))
                .or_else(|| body.get("sessionId"))
                .and_then(Value::as_str);

            return match session_id {
                Some(id) if !id.is_empty() => Ok(HandshakeResponse::W3c {
                    session_id: id.to_string(),
                    capabilities: capabilities.clone(),
                }),
                _ => Err(Error::handshake_protocol(
                    "response does not contain a session id",
                    body.clone(),
                )),
            };
        }

        match body.get("sessionId").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => {
                let capabilities = match value {
                    Some(Value::Object(caps)) => caps.clone(),
                    _ => body
                        .as_object()
                        .map(|top| {
                            top.iter()
                                .filter(|(key, _)| !LEGACY_ENVELOPE_FIELDS.contains(&key.as_str()))
                                .map(|(key, value)| (key.clone(), value.clone()))
                                .collect()
                        })
                        .unwrap_or_else(Map::new),
                };

                Ok(HandshakeResponse::Legacy {
                    session_id: id.to_string(),
                    capabilities,
                })
            }
            _ => Err(Error::handshake_protocol(
                "response does not contain a session id",
                body.clone(),
            )),
        }
    }

    pub fn session_id(&self) -> &str {
        match self {
            HandshakeResponse::W3c { session_id, .. } | HandshakeResponse::Legacy { session_id, .. } => session_id,
        }
    }

    /// Capabilities returned by the server
    pub fn capabilities(&self) -> &CapabilityMap {
        match self {
            HandshakeResponse::W3c { capabilities, .. } | HandshakeResponse::Legacy { capabilities, .. } => {
                capabilities
            }
        }
    }

    pub fn is_w3c(&self) -> bool {
        matches!(self, HandshakeResponse::W3c { .. })
    }
}

/// Error message if `body` is a W3C or JSONWire error envelope
fn error_message(status: u16, body: &Value) -> Option<String> {
    let value = body.get("value");
    let message = value
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("unknown error");

    if let Some(error) = value.and_then(|v| v.get("error")).and_then(Value::as_str) {
        return Some(format!("{}: {}", error, message));
    }

    if let Some(code) = body.get("status").and_then(Value::as_i64) {
        if code != 0 {
            return Some(format!("status {}: {}", code, message));
        }
    }

    if status >= 400 {
        return Some(format!("HTTP {}: {}", status, message));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_w3c_envelope() {
        let body = json!({
            "value": {
                "sessionId": "abc",
                "capabilities": { "browserName": "firefox" }
            }
        });

        let response = HandshakeResponse::parse(200, &body).unwrap();
        assert!(response.is_w3c());
        assert_eq!(response.session_id(), "abc");
        assert_eq!(response.capabilities()["browserName"], "firefox");
    }

    #[test]
    fn test_parse_legacy_envelope() {
        let body = json!({
            "sessionId": "legacy-1",
            "status": 0,
            "value": { "browserName": "chrome", "platform": "LINUX" }
        });

        let response = HandshakeResponse::parse(200, &body).unwrap();
        assert!(!response.is_w3c());
        assert_eq!(response.session_id(), "legacy-1");
        assert_eq!(response.capabilities()["platform"], "LINUX");
    }

    #[test]
    fn test_parse_legacy_top_level_capabilities() {
        let body = json!({ "sessionId": "legacy-2", "browserName": "safari" });

        let response = HandshakeResponse::parse(200, &body).unwrap();
        assert_eq!(response.capabilities().len(), 1);
        assert_eq!(response.capabilities()["browserName"], "safari");
    }

    #[test]
    fn test_parse_w3c_error_envelope() {
        let body = json!({
            "value": {
                "error": "session not created",
                "message": "Unable to find a matching set of capabilities"
            }
        });

        let err = HandshakeResponse::parse(500, &body).unwrap_err();
        match err {
            Error::HandshakeProtocol { message, payload } => {
                assert!(message.starts_with("session not created"));
                assert_eq!(payload, body);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_legacy_error_status() {
        let body = json!({ "sessionId": null, "status": 33, "value": { "message": "no browser" } });
        assert!(matches!(
            HandshakeResponse::parse(200, &body),
            Err(Error::HandshakeProtocol { .. })
        ));
    }

    #[test]
    fn test_parse_missing_session_id() {
        let body = json!({ "value": { "capabilities": {} } });
        assert!(matches!(
            HandshakeResponse::parse(200, &body),
            Err(Error::HandshakeProtocol { .. })
        ));

        assert!(matches!(
            HandshakeResponse::parse(200, &Value::Null),
            Err(Error::HandshakeProtocol { .. })
        ));
    }
}
