//! Command invocation
//!
//! Turns a descriptor plus positional arguments into one transport round trip
//! and unwraps the response envelope.

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::connection::ConnectionInfo;
use crate::error::InvocationFailure;
use crate::protocol::{CommandDescriptor, SESSION_ID_VARIABLE};
use crate::transport::{HttpMethod, Transport, TransportResponse};
use crate::{Error, Result};

const MAX_LOGGED_RESULT: usize = 1000;

/// A fully bound request, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct BoundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

/// Bind `args` to the descriptor.
///
/// Arguments are positional: URL variables first, in template order, then body
/// parameters in declared order. Nothing is sent when binding fails.
pub fn bind(
    descriptor: &CommandDescriptor,
    connection: &ConnectionInfo,
    session_id: &str,
    args: &[Value],
) -> Result<BoundRequest> {
    let variables: Vec<&str> = descriptor.variables().collect();
    let expected = variables.len() + descriptor.parameters.len();
    if args.len() > expected {
        return Err(Error::invalid_argument(format!(
            "{} takes at most {} arguments, got {}",
            descriptor.name,
            expected,
            args.len()
        )));
    }

    let mut values = args.iter();
    let mut bound_variables = Vec::with_capacity(variables.len());
    for variable in &variables {
        let value = match values.next() {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(Error::invalid_argument(format!(
                    "{}: URL variable \"{}\" must be a string, got {}",
                    descriptor.name, variable, other
                )))
            }
            None => {
                return Err(Error::invalid_argument(format!(
                    "{}: missing URL variable \"{}\"",
                    descriptor.name, variable
                )))
            }
        };
        bound_variables.push((*variable, value));
    }

    let mut body = Map::new();
    for parameter in descriptor.parameters {
        match values.next() {
            None | Some(Value::Null) if parameter.required => {
                return Err(Error::invalid_argument(format!(
                    "{}: missing required parameter \"{}\"",
                    descriptor.name, parameter.name
                )))
            }
            None | Some(Value::Null) => {}
            Some(value) if !parameter.kind.accepts(value) => {
                return Err(Error::invalid_argument(format!(
                    "{}: parameter \"{}\" expects {}, got {}",
                    descriptor.name, parameter.name, parameter.kind, value
                )))
            }
            Some(value) => {
                body.insert(parameter.name.to_string(), value.clone());
            }
        }
    }

    let endpoint = expand_endpoint(descriptor.endpoint, session_id, &bound_variables);
    let body = descriptor.method.has_body().then_some(Value::Object(body));

    Ok(BoundRequest {
        method: descriptor.method,
        url: connection.url_for(&endpoint),
        body,
    })
}

fn expand_endpoint(template: &str, session_id: &str, variables: &[(&str, String)]) -> String {
    template
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(SESSION_ID_VARIABLE) => urlencoding::encode(session_id).into_owned(),
            Some(name) => variables
                .iter()
                .find(|(variable, _)| *variable == name)
                .map(|(_, value)| urlencoding::encode(value).into_owned())
                .unwrap_or_default(),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Unwrap a command response, mapping error envelopes onto [`InvocationFailure`]
pub fn unwrap_response(response: TransportResponse) -> std::result::Result<Value, InvocationFailure> {
    let TransportResponse { status, body } = response;
    let value = body.get("value");

    if let Some(error) = value.and_then(|v| v.get("error")).and_then(Value::as_str) {
        let message = value
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(InvocationFailure::Remote {
            status,
            error: error.to_string(),
            message,
            payload: body,
        });
    }

    if let Some(code) = body.get("status").and_then(Value::as_i64).filter(|code| *code != 0) {
        let message = value
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(InvocationFailure::Remote {
            status,
            error: jsonwire_error(code).to_string(),
            message,
            payload: body,
        });
    }

    if status >= 400 {
        return Err(InvocationFailure::Remote {
            status,
            error: "unknown error".to_string(),
            message: format!("HTTP {}", status),
            payload: body,
        });
    }

    Ok(match body {
        Value::Object(mut map) => map.remove("value").unwrap_or(Value::Null),
        other => other,
    })
}

/// W3C error code for a legacy JSONWire status
fn jsonwire_error(code: i64) -> &'static str {
    match code {
        6 => "invalid session id",
        7 => "no such element",
        8 => "no such frame",
        9 => "unknown command",
        10 => "stale element reference",
        11 => "element not visible",
        12 => "invalid element state",
        15 => "element not selectable",
        17 => "javascript error",
        19 => "invalid selector",
        21 => "timeout",
        23 => "no such window",
        24 => "invalid cookie domain",
        25 => "unable to set cookie",
        26 => "unexpected alert open",
        27 => "no such alert",
        28 => "script timeout",
        29 => "invalid element coordinates",
        32 | 51 => "invalid selector",
        33 => "session not created",
        34 => "move target out of bounds",
        60 => "element not interactable",
        _ => "unknown error",
    }
}

/// Bind, send and unwrap one command
pub async fn invoke(
    transport: &dyn Transport,
    descriptor: &CommandDescriptor,
    connection: &ConnectionInfo,
    session_id: &str,
    args: &[Value],
) -> Result<Value> {
    let request = bind(descriptor, connection, session_id, args)?;

    info!("COMMAND {}({})", descriptor.name, display_args(args));
    debug!("[{}] {}", request.method, request.url);

    let response = transport
        .send(request.method, &request.url, request.body)
        .await
        .map_err(|e| Error::command_invocation(descriptor.name, e.into()))?;

    let value = unwrap_response(response)
        .map_err(|failure| Error::command_invocation(descriptor.name, failure))?;

    debug!("RESULT {}", truncate(&value.to_string()));
    Ok(value)
}

fn display_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| truncate(&arg.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(text: &str) -> String {
    if text.len() <= MAX_LOGGED_RESULT {
        return text.to_string();
    }
    let end = (0..=MAX_LOGGED_RESULT)
        .rev()
        .find(|idx| text.is_char_boundary(*idx))
        .unwrap_or(0);
    format!("{}...", &text[..end])
}
