//! # Capability negotiation
//!
//! Turns a caller-supplied capability specification into a session-creation
//! body that both the legacy JSONWire dialect and the W3C dialect accept.
//!
//! ## Forms
//! - **Legacy**: a flat `name -> value` map (`desiredCapabilities`)
//! - **Structured**: `alwaysMatch` + ordered `firstMatch` list (`capabilities`)
//!
//! ## Example
//! ```rust
//! use webdriver_session::capabilities::{negotiate, CapabilitySpec};
//! use serde_json::json;
//!
//! let spec = CapabilitySpec::from_value(json!({ "browserName": "firefox" })).unwrap();
//! let body = negotiate(&spec).unwrap();
//! assert_eq!(body.desired_capabilities["browserName"], "firefox");
//! assert_eq!(body.capabilities.first_match.len(), 1);
//! ```

pub mod negotiator;

pub use negotiator::{negotiate, NegotiatedRequestBody, W3cCapabilities};

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Flat capability map
pub type CapabilityMap = Map<String, Value>;

/// Caller capability input
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilitySpec {
    /// Legacy flat capability map
    Legacy(CapabilityMap),
    /// W3C `alwaysMatch` / `firstMatch` form
    Structured {
        always_match: CapabilityMap,
        first_match: Vec<CapabilityMap>,
    },
}

impl Default for CapabilitySpec {
    fn default() -> Self {
        CapabilitySpec::Legacy(Map::new())
    }
}

impl CapabilitySpec {
    /// Structured spec with a single empty `firstMatch` entry
    pub fn always_match(always_match: CapabilityMap) -> Self {
        CapabilitySpec::Structured {
            always_match,
            first_match: vec![Map::new()],
        }
    }

    /// Classify a JSON value.
    ///
    /// An object carrying `alwaysMatch` or `firstMatch` is structured; any
    /// other object is a legacy flat map. A missing `firstMatch` defaults to a
    /// single empty entry.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(Error::negotiation("capabilities must be a JSON object"));
        };

        if !map.contains_key("alwaysMatch") && !map.contains_key("firstMatch") {
            return Ok(CapabilitySpec::Legacy(map));
        }

        let always_match = match map.remove("alwaysMatch") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(always)) => always,
            Some(_) => return Err(Error::negotiation("alwaysMatch must be an object")),
        };

        let first_match = match map.remove("firstMatch") {
            None | Some(Value::Null) => vec![Map::new()],
            Some(Value::Array(entries)) => entries
                .into_iter()
                .map(|entry| match entry {
                    Value::Object(entry) => Ok(entry),
                    _ => Err(Error::negotiation("firstMatch entries must be objects")),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(Error::negotiation("firstMatch must be an array")),
        };

        if !map.is_empty() {
            let keys: Vec<_> = map.keys().cloned().collect();
            return Err(Error::negotiation(format!(
                "unexpected keys next to alwaysMatch/firstMatch: {}",
                keys.join(", ")
            )));
        }

        Ok(CapabilitySpec::Structured {
            always_match,
            first_match,
        })
    }

    /// Whether the caller used the W3C form
    pub fn is_structured(&self) -> bool {
        matches!(self, CapabilitySpec::Structured { .. })
    }
}

impl TryFrom<Value> for CapabilitySpec {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        CapabilitySpec::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_object_is_legacy() {
        let spec = CapabilitySpec::from_value(json!({ "browserName": "chrome" })).unwrap();
        assert!(!spec.is_structured());
    }

    #[test]
    fn test_structured_defaults_first_match() {
        let spec = CapabilitySpec::from_value(json!({ "alwaysMatch": { "browserName": "chrome" } })).unwrap();
        match spec {
            CapabilitySpec::Structured { always_match, first_match } => {
                assert_eq!(always_match["browserName"], "chrome");
                assert_eq!(first_match, vec![Map::new()]);
            }
            CapabilitySpec::Legacy(_) => panic!("expected structured spec"),
        }
    }

    #[test]
    fn test_rejects_non_object() {
        let err = CapabilitySpec::from_value(json!(["chrome"])).unwrap_err();
        assert!(matches!(err, Error::Negotiation(_)));
    }

    #[test]
    fn test_rejects_malformed_first_match() {
        let err = CapabilitySpec::from_value(json!({ "firstMatch": [1] })).unwrap_err();
        assert!(matches!(err, Error::Negotiation(_)));

        let err = CapabilitySpec::from_value(json!({ "firstMatch": {} })).unwrap_err();
        assert!(matches!(err, Error::Negotiation(_)));
    }

    #[test]
    fn test_rejects_mixed_keys() {
        let err = CapabilitySpec::from_value(json!({ "alwaysMatch": {}, "browserName": "chrome" })).unwrap_err();
        assert!(matches!(err, Error::Negotiation(_)));
    }
}
