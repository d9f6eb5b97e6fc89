//! Options accepted by the session entry points

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::capabilities::{CapabilityMap, CapabilitySpec};
use crate::config::Config;
use crate::connection::{ConnectionInfo, DirectConnect};
use crate::environment::EnvironmentOverrides;
use crate::logging::LogLevel;
use crate::Result;

/// Options for creating a new session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSessionOptions {
    /// Requested capabilities, legacy or structured
    pub capabilities: CapabilitySpec,
    /// Endpoint the handshake is sent to
    pub connection: ConnectionInfo,
    /// Known-in-advance direct-connect target for the handshake itself
    pub direct_connect: Option<DirectConnect>,
    /// Output directory, used only when no output path is established yet
    pub output_dir: Option<PathBuf>,
    /// Global log level
    pub log_level: Option<LogLevel>,
    /// Per-logger level overrides, keyed by tracing target
    pub logger_levels: BTreeMap<String, LogLevel>,
}

impl NewSessionOptions {
    pub fn new(capabilities: CapabilitySpec) -> Self {
        Self {
            capabilities,
            ..Default::default()
        }
    }

    /// Options seeded from client configuration
    pub fn from_config(config: &Config, capabilities: CapabilitySpec) -> Result<Self> {
        Ok(Self {
            capabilities,
            connection: config.connection(),
            output_dir: config.output_dir.clone(),
            log_level: Some(config.log_level()?),
            ..Default::default()
        })
    }

    pub fn with_connection(mut self, connection: ConnectionInfo) -> Self {
        self.connection = connection;
        self
    }

    pub fn with_direct_connect(mut self, direct_connect: DirectConnect) -> Self {
        self.direct_connect = Some(direct_connect);
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn with_logger_level(mut self, logger: impl Into<String>, level: LogLevel) -> Self {
        self.logger_levels.insert(logger.into(), level);
        self
    }

    /// Endpoint the handshake request is actually sent to
    pub fn initial_target(&self) -> ConnectionInfo {
        match &self.direct_connect {
            Some(direct) if !direct.is_empty() => direct.apply(&self.connection),
            _ => self.connection.clone(),
        }
    }
}

/// Options for attaching to an existing session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachOptions {
    /// Id of the session to attach to; required
    pub session_id: Option<String>,
    /// Endpoint serving the session
    pub connection: ConnectionInfo,
    /// Environment predicates; unset flags take their defaults
    pub environment: EnvironmentOverrides,
    /// Capabilities the session was created with, if known
    pub capabilities: CapabilityMap,
    /// Request replayed on reload; defaults to `capabilities` in legacy form
    pub requested_capabilities: Option<CapabilitySpec>,
}

impl AttachOptions {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            ..Default::default()
        }
    }

    pub fn with_connection(mut self, connection: ConnectionInfo) -> Self {
        self.connection = connection;
        self
    }

    pub fn with_environment(mut self, environment: EnvironmentOverrides) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_capabilities(mut self, capabilities: CapabilityMap) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// New-session request replayed when an attached session reloads
    pub(crate) fn reload_request(&self) -> NewSessionOptions {
        let capabilities = self
            .requested_capabilities
            .clone()
            .unwrap_or_else(|| CapabilitySpec::Legacy(self.capabilities.clone()));

        NewSessionOptions {
            capabilities,
            connection: self.connection.clone(),
            ..Default::default()
        }
    }
}
