//! Dual-dialect request body construction

use serde::{Deserialize, Serialize};
use serde_json::Map;

use super::{CapabilityMap, CapabilitySpec};
use crate::{Error, Result};

/// W3C `capabilities` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct W3cCapabilities {
    pub always_match: CapabilityMap,
    pub first_match: Vec<CapabilityMap>,
}

/// Body of `POST /session`.
///
/// Carries both dialects so a receiver that understands either can serve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiatedRequestBody {
    pub desired_capabilities: CapabilityMap,
    pub capabilities: W3cCapabilities,
}

/// Build the session-creation body for `spec`.
///
/// Pure: no I/O, the input is left untouched.
pub fn negotiate(spec: &CapabilitySpec) -> Result<NegotiatedRequestBody> {
    match spec {
        CapabilitySpec::Legacy(flat) => Ok(NegotiatedRequestBody {
            desired_capabilities: flat.clone(),
            capabilities: W3cCapabilities {
                always_match: flat.clone(),
                first_match: vec![Map::new()],
            },
        }),
        CapabilitySpec::Structured {
            always_match,
            first_match,
        } => {
            let first = first_match
                .first()
                .ok_or_else(|| Error::negotiation("firstMatch must contain at least one entry"))?;

            // firstMatch[0] wins on conflicting keys
            let mut desired = always_match.clone();
            for (key, value) in first {
                desired.insert(key.clone(), value.clone());
            }

            Ok(NegotiatedRequestBody {
                desired_capabilities: desired,
                capabilities: W3cCapabilities {
                    always_match: always_match.clone(),
                    first_match: first_match.clone(),
                },
            })
        }
    }
}
