//! Client entry point

use std::sync::Arc;

use super::handle::Session;
use super::handshake;
use super::options::{AttachOptions, NewSessionOptions};
use crate::config::Config;
use crate::logging::{LogConfigurator, TracingLogConfigurator};
use crate::protocol::CommandRegistry;
use crate::transport::{HttpTransport, Transport};
use crate::Result;

/// Creates and attaches to sessions
///
/// Holds the collaborators every session shares: the transport, the command
/// registry and the log configurator.
#[derive(Debug, Clone)]
pub struct WebDriverClient {
    transport: Arc<dyn Transport>,
    registry: CommandRegistry,
    logging: Arc<dyn LogConfigurator>,
}

impl WebDriverClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        registry: CommandRegistry,
        logging: Arc<dyn LogConfigurator>,
    ) -> Self {
        Self {
            transport,
            registry,
            logging,
        }
    }

    /// HTTP transport, standard registry and a globally installed tracing
    /// subscriber seeded with `config.log_path`
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.http_options())?;
        let logging = TracingLogConfigurator::install(config.log_path.clone())?;

        Ok(Self::new(
            Arc::new(transport),
            CommandRegistry::standard(),
            Arc::new(logging),
        ))
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Negotiate a new session with the remote end
    pub async fn new_session(&self, options: NewSessionOptions) -> Result<Session> {
        let state = handshake::new_session(
            self.transport.as_ref(),
            &self.registry,
            self.logging.as_ref(),
            &options,
        )
        .await?;

        Ok(Session::new(
            self.transport.clone(),
            self.registry.clone(),
            self.logging.clone(),
            options,
            state,
        ))
    }

    /// Attach to a session that already exists; performs no I/O
    pub fn attach_to_session(&self, options: AttachOptions) -> Result<Session> {
        let state = handshake::attach(&self.registry, &options)?;

        Ok(Session::new(
            self.transport.clone(),
            self.registry.clone(),
            self.logging.clone(),
            options.reload_request(),
            state,
        ))
    }
}
