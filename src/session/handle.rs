//! Session handle and bound commands

use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use super::handshake;
use super::options::NewSessionOptions;
use super::state::SessionState;
use crate::capabilities::{CapabilityMap, CapabilitySpec};
use crate::commands;
use crate::connection::ConnectionInfo;
use crate::environment::EnvironmentPredicates;
use crate::logging::LogConfigurator;
use crate::protocol::CommandRegistry;
use crate::transport::Transport;
use crate::{Error, Result};

struct SessionInner {
    transport: Arc<dyn Transport>,
    registry: CommandRegistry,
    logging: Arc<dyn LogConfigurator>,
    /// Request replayed by `reload`
    request: NewSessionOptions,
    state: RwLock<Arc<SessionState>>,
}

/// A WebDriver session
///
/// Cheap to clone; clones share the same underlying session, so a reload
/// through one handle is observed by all of them.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        registry: CommandRegistry,
        logging: Arc<dyn LogConfigurator>,
        request: NewSessionOptions,
        state: SessionState,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                transport,
                registry,
                logging,
                request,
                state: RwLock::new(Arc::new(state)),
            }),
        }
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> Arc<SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether both handles refer to the same session
    pub fn same_session(&self, other: &Session) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn session_id(&self) -> String {
        self.snapshot().session_id.clone()
    }

    /// Capabilities returned by the remote end
    pub fn capabilities(&self) -> CapabilityMap {
        self.snapshot().capabilities.clone()
    }

    /// Capabilities originally requested
    pub fn requested_capabilities(&self) -> &CapabilitySpec {
        &self.inner.request.capabilities
    }

    pub fn environment(&self) -> EnvironmentPredicates {
        self.snapshot().environment
    }

    /// Endpoint commands are currently sent to
    pub fn connection(&self) -> ConnectionInfo {
        self.snapshot().connection.clone()
    }

    pub fn command_names(&self) -> BTreeSet<&'static str> {
        self.snapshot().table.names()
    }

    /// Whether `name` is in the current command table
    pub fn supports(&self, name: &str) -> bool {
        self.snapshot().table.contains(name)
    }

    /// Re-run the handshake with the original request.
    ///
    /// On success the whole state is replaced and every handle observes it;
    /// on failure the previous state is kept.
    pub async fn reload(&self) -> Result<Session> {
        let old_id = self.session_id();
        let state = handshake::new_session(
            self.inner.transport.as_ref(),
            &self.inner.registry,
            self.inner.logging.as_ref(),
            &self.inner.request,
        )
        .await?;

        info!("Reloaded session {} as {}", old_id, state.session_id);
        *self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(state);
        Ok(self.clone())
    }

    /// Look up a command in the current table
    pub fn command(&self, name: &str) -> Result<Command> {
        let snapshot = self.snapshot();
        let descriptor = snapshot
            .table
            .get(name)
            .ok_or_else(|| Error::unsupported_command(name))?;

        Ok(Command {
            session: self.clone(),
            name: descriptor.name,
        })
    }

    /// Invoke a command by name
    pub async fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.command(name)?.call(args).await
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.snapshot();
        f.debug_struct("Session")
            .field("session_id", &state.session_id)
            .field("connection", &state.connection)
            .field("environment", &state.environment)
            .field("commands", &state.table.len())
            .finish()
    }
}

/// A command bound to a session
///
/// Binding to the session id, endpoint and table happens at call time, so a
/// handle obtained before a reload targets the reloaded session.
#[derive(Debug, Clone)]
pub struct Command {
    session: Session,
    name: &'static str,
}

impl Command {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Invoke with positional arguments: URL variables, then body parameters
    pub async fn call(&self, args: &[Value]) -> Result<Value> {
        let state = self.session.snapshot();
        let descriptor = *state
            .table
            .get(self.name)
            .ok_or_else(|| Error::unsupported_command(self.name))?;

        commands::invoke(
            self.session.inner.transport.as_ref(),
            &descriptor,
            &state.connection,
            &state.session_id,
            args,
        )
        .await
    }
}
