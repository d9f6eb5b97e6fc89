//! Session handshake
//!
//! `new_session` runs negotiate, send, detect, resolve and build strictly in
//! sequence. `attach` skips everything but the build and never touches the
//! network.

use tracing::{debug, info};

use super::options::{AttachOptions, NewSessionOptions};
use super::state::SessionState;
use crate::capabilities::negotiate;
use crate::commands;
use crate::connection;
use crate::environment::{detect, HandshakeResponse};
use crate::logging::{LogConfigurator, LogSettings};
use crate::protocol::CommandRegistry;
use crate::transport::{HttpMethod, Transport};
use crate::{Error, Result};

/// Create a session on the remote end
pub(crate) async fn new_session(
    transport: &dyn Transport,
    registry: &CommandRegistry,
    logging: &dyn LogConfigurator,
    options: &NewSessionOptions,
) -> Result<SessionState> {
    // nothing may be logged before the output path is in effect
    let settings = LogSettings {
        level: options.log_level,
        logger_levels: options.logger_levels.clone(),
        output_path: LogSettings::resolve_output_path(
            logging.output_path(),
            options.output_dir.as_deref(),
        ),
    };
    logging.configure(&settings)?;

    info!("Initiate new session using the WebDriver protocol");

    let request = negotiate(&options.capabilities)?;
    let target = options.initial_target();
    let url = target.url_for("/session");

    let body = serde_json::to_value(&request)?;
    info!("[POST] {}", url);
    info!("DATA {}", body);

    let response = transport
        .send(HttpMethod::Post, &url, Some(body))
        .await
        .map_err(Error::HandshakeTransport)?;

    let response = HandshakeResponse::parse(response.status, &response.body)?;
    let environment = detect(&response);
    let connection = connection::resolve(&target, response.capabilities());
    let table = commands::build(registry, &environment);

    info!(
        "Created session {} ({})",
        response.session_id(),
        if response.is_w3c() { "W3C" } else { "JSONWire" }
    );

    Ok(SessionState {
        session_id: response.session_id().to_string(),
        capabilities: response.capabilities().clone(),
        environment,
        connection,
        table,
    })
}

/// Build the state of a pre-existing session from caller-supplied data
pub(crate) fn attach(registry: &CommandRegistry, options: &AttachOptions) -> Result<SessionState> {
    let session_id = options
        .session_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::attach_validation("a session id is required to attach"))?;

    let environment = options.environment.resolve();
    let table = commands::build(registry, &environment);

    debug!("Attached to session {} at {}", session_id, options.connection);

    Ok(SessionState {
        session_id: session_id.to_string(),
        capabilities: options.capabilities.clone(),
        environment,
        connection: options.connection.clone(),
        table,
    })
}
