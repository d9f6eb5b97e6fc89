//! # Command registry
//!
//! Static catalogue of remote commands. Every descriptor names its endpoint
//! template, declared body parameters and an applicability predicate over the
//! session environment. The catalogue is a superset covering both dialects and
//! the vendor extensions; [`crate::commands::build`] filters it per session.
//!
//! ## Module structure
//! - `webdriver`: W3C WebDriver commands
//! - `jsonwp`: legacy JSONWire commands
//! - `mobile`: Appium / mobile JSONWire commands
//! - `chromium`: chromedriver extensions
//! - `gecko`: geckodriver extensions
//! - `sauce`: Sauce Labs extensions
//! - `selenium`: Selenium standalone / Grid extensions

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::environment::EnvironmentPredicates;
use crate::transport::HttpMethod;

/// Build a [`Parameter`] literal.
///
/// `param!("url": String)` is required, `param!("handle"?: String)` optional.
macro_rules! param {
    ($name:literal: $kind:ident) => {
        $crate::protocol::Parameter {
            name: $name,
            kind: $crate::protocol::ParameterKind::$kind,
            required: true,
        }
    };
    ($name:literal?: $kind:ident) => {
        $crate::protocol::Parameter {
            name: $name,
            kind: $crate::protocol::ParameterKind::$kind,
            required: false,
        }
    };
}

pub(crate) use param;

pub mod chromium;
pub mod gecko;
pub mod jsonwp;
pub mod mobile;
pub mod sauce;
pub mod selenium;
pub mod webdriver;

/// Placeholder of the session id in endpoint templates
pub const SESSION_ID_VARIABLE: &str = "sessionId";

/// Protocol a descriptor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolFamily {
    WebDriver,
    JsonWire,
    Mobile,
    Chromium,
    Gecko,
    Sauce,
    Selenium,
}

/// Expected JSON type of a body parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Any,
}

impl ParameterKind {
    /// Whether `value` has this type
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ParameterKind::String => value.is_string(),
            ParameterKind::Number => value.is_number(),
            ParameterKind::Boolean => value.is_boolean(),
            ParameterKind::Object => value.is_object(),
            ParameterKind::Array => value.is_array(),
            ParameterKind::Any => true,
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterKind::String => "string",
            ParameterKind::Number => "number",
            ParameterKind::Boolean => "boolean",
            ParameterKind::Object => "object",
            ParameterKind::Array => "array",
            ParameterKind::Any => "any",
        };
        f.write_str(name)
    }
}

/// Declared body parameter of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub kind: ParameterKind,
    pub required: bool,
}

/// Applicability test of a descriptor
pub type Applicability = fn(&EnvironmentPredicates) -> bool;

/// One remote command
#[derive(Debug, Clone, Copy)]
pub struct CommandDescriptor {
    pub protocol: ProtocolFamily,
    pub name: &'static str,
    pub method: HttpMethod,
    /// Endpoint template, e.g. `/session/:sessionId/element/:elementId/click`
    pub endpoint: &'static str,
    pub parameters: &'static [Parameter],
    pub applicability: Applicability,
}

impl CommandDescriptor {
    pub const fn new(
        protocol: ProtocolFamily,
        name: &'static str,
        method: HttpMethod,
        endpoint: &'static str,
        parameters: &'static [Parameter],
        applicability: Applicability,
    ) -> Self {
        Self {
            protocol,
            name,
            method,
            endpoint,
            parameters,
            applicability,
        }
    }

    /// Evaluate the applicability predicate
    pub fn is_applicable(&self, environment: &EnvironmentPredicates) -> bool {
        (self.applicability)(environment)
    }

    /// URL variables the caller must supply, in template order
    pub fn variables(&self) -> impl Iterator<Item = &'static str> {
        self.endpoint
            .split('/')
            .filter_map(|segment| segment.strip_prefix(':'))
            .filter(|name| *name != SESSION_ID_VARIABLE)
    }

    /// Whether the endpoint is scoped to a session
    pub fn requires_session(&self) -> bool {
        self.endpoint
            .split('/')
            .any(|segment| segment.strip_prefix(':') == Some(SESSION_ID_VARIABLE))
    }
}

/// Ordered, shared command catalogue
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    descriptors: Arc<[CommandDescriptor]>,
}

impl CommandRegistry {
    /// Registry over the given descriptors, order preserved
    pub fn new(descriptors: Vec<CommandDescriptor>) -> Self {
        Self {
            descriptors: descriptors.into(),
        }
    }

    /// Every protocol this crate ships, core dialects first
    pub fn standard() -> Self {
        let sets: [&[CommandDescriptor]; 7] = [
            webdriver::COMMANDS,
            jsonwp::COMMANDS,
            mobile::COMMANDS,
            chromium::COMMANDS,
            gecko::COMMANDS,
            sauce::COMMANDS,
            selenium::COMMANDS,
        ];

        Self::new(sets.iter().flat_map(|set| set.iter().copied()).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_variables_skip_session_id() {
        let descriptor = webdriver::COMMANDS
            .iter()
            .find(|d| d.name == "getElementAttribute")
            .unwrap();

        assert!(descriptor.requires_session());
        assert_eq!(descriptor.variables().collect::<Vec<_>>(), vec!["elementId", "name"]);
    }

    #[test]
    fn test_status_is_sessionless() {
        let descriptor = webdriver::COMMANDS.iter().find(|d| d.name == "status").unwrap();
        assert!(!descriptor.requires_session());
        assert_eq!(descriptor.variables().count(), 0);
    }

    #[test]
    fn test_parameter_kinds() {
        assert!(ParameterKind::String.accepts(&json!("x")));
        assert!(!ParameterKind::String.accepts(&json!(1)));
        assert!(ParameterKind::Number.accepts(&json!(1.5)));
        assert!(ParameterKind::Array.accepts(&json!([])));
        assert!(ParameterKind::Any.accepts(&Value::Null));
    }

    #[test]
    fn test_standard_registry_names_unique_per_family() {
        let registry = CommandRegistry::standard();
        let mut seen = HashSet::new();

        for descriptor in registry.iter() {
            assert!(
                seen.insert((descriptor.protocol, descriptor.name)),
                "duplicate {:?} command {}",
                descriptor.protocol,
                descriptor.name
            );
        }
    }

    #[test]
    fn test_standard_registry_templates_are_well_formed() {
        for descriptor in CommandRegistry::standard().iter() {
            assert!(descriptor.endpoint.starts_with('/'), "{}", descriptor.name);
            assert!(!descriptor.endpoint.ends_with('/'), "{}", descriptor.name);
        }
    }
}
