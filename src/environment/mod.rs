//! # Environment detection
//!
//! Derives the environment predicates that gate the command table from the
//! authoritative session-creation response.
//!
//! ## Module structure
//! - `response`: the two create-session envelopes as a tagged union
//! - `detector`: predicate derivation from returned capabilities

pub mod detector;
pub mod response;

pub use detector::detect;
pub use response::HandshakeResponse;

use serde::{Deserialize, Serialize};

/// Environment predicates of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentPredicates {
    /// Remote end speaks the W3C dialect
    #[serde(rename = "isW3C")]
    pub is_w3c: bool,
    pub is_mobile: bool,
    #[serde(rename = "isIOS")]
    pub is_ios: bool,
    pub is_android: bool,
    pub is_chrome: bool,
    pub is_firefox: bool,
    pub is_sauce: bool,
    pub is_selenium_standalone: bool,
}

/// Caller-supplied predicates used when attaching to an existing session.
///
/// Unset flags default to `false`, except `is_w3c` which defaults to `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentOverrides {
    #[serde(rename = "isW3C")]
    pub is_w3c: Option<bool>,
    pub is_mobile: Option<bool>,
    #[serde(rename = "isIOS")]
    pub is_ios: Option<bool>,
    pub is_android: Option<bool>,
    pub is_chrome: Option<bool>,
    pub is_firefox: Option<bool>,
    pub is_sauce: Option<bool>,
    pub is_selenium_standalone: Option<bool>,
}

impl EnvironmentOverrides {
    /// Fill unset flags with their defaults
    pub fn resolve(&self) -> EnvironmentPredicates {
        EnvironmentPredicates {
            is_w3c: self.is_w3c.unwrap_or(true),
            is_mobile: self.is_mobile.unwrap_or(false),
            is_ios: self.is_ios.unwrap_or(false),
            is_android: self.is_android.unwrap_or(false),
            is_chrome: self.is_chrome.unwrap_or(false),
            is_firefox: self.is_firefox.unwrap_or(false),
            is_sauce: self.is_sauce.unwrap_or(false),
            is_selenium_standalone: self.is_selenium_standalone.unwrap_or(false),
        }
    }
}

impl From<EnvironmentPredicates> for EnvironmentOverrides {
    fn from(predicates: EnvironmentPredicates) -> Self {
        Self {
            is_w3c: Some(predicates.is_w3c),
            is_mobile: Some(predicates.is_mobile),
            is_ios: Some(predicates.is_ios),
            is_android: Some(predicates.is_android),
            is_chrome: Some(predicates.is_chrome),
            is_firefox: Some(predicates.is_firefox),
            is_sauce: Some(predicates.is_sauce),
            is_selenium_standalone: Some(predicates.is_selenium_standalone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overrides_default_to_w3c() {
        let predicates = EnvironmentOverrides::default().resolve();
        assert_eq!(
            predicates,
            EnvironmentPredicates {
                is_w3c: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_overrides_from_json() {
        let overrides: EnvironmentOverrides =
            serde_json::from_value(json!({ "isW3C": false, "isSauce": true })).unwrap();
        let predicates = overrides.resolve();

        assert!(!predicates.is_w3c);
        assert!(predicates.is_sauce);
        assert!(!predicates.is_mobile);
    }

    #[test]
    fn test_predicates_roundtrip_through_overrides() {
        let predicates = EnvironmentPredicates {
            is_w3c: false,
            is_chrome: true,
            ..Default::default()
        };
        assert_eq!(EnvironmentOverrides::from(predicates).resolve(), predicates);
    }
}
