//! Unified error types for the WebDriver session core

use serde_json::Value;
use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the transport collaborator.
///
/// Distinct from a well-formed error response: a `TransportError` means no
/// usable HTTP response came back at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Could not reach the remote end
    #[error("connection failed: {0}")]
    Connect(String),

    /// The round trip did not complete in time
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request could not be built or sent
    #[error("request failed: {0}")]
    Request(String),

    /// The response body was not valid JSON
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Why a dispatched command failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvocationFailure {
    /// The round trip itself failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The remote end answered with an error envelope
    #[error("remote error (HTTP {status}) {error}: {message}")]
    Remote {
        status: u16,
        error: String,
        message: String,
        payload: Value,
    },
}

/// Unified error type for the WebDriver session core
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed capability specification, detected before any network call
    #[error("Capability negotiation failed: {0}")]
    Negotiation(String),

    /// The create-session round trip failed at the transport layer
    #[error("Session creation request failed: {0}")]
    HandshakeTransport(#[source] TransportError),

    /// The remote end answered but did not produce a usable session
    #[error("Session could not be created: {message}")]
    HandshakeProtocol { message: String, payload: Value },

    /// Attach requested without the data it needs
    #[error("Cannot attach to session: {0}")]
    AttachValidation(String),

    /// Command not available for the session's detected environment
    #[error("Command \"{command}\" is not supported by this session")]
    UnsupportedCommand { command: String },

    /// A dispatched command failed
    #[error("Command \"{command}\" failed: {source}")]
    CommandInvocation {
        command: String,
        #[source]
        source: InvocationFailure,
    },

    /// Arguments rejected locally before dispatch
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging setup error
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new negotiation error
    pub fn negotiation<S: Into<String>>(msg: S) -> Self {
        Error::Negotiation(msg.into())
    }

    /// Create a new handshake protocol error carrying the server payload
    pub fn handshake_protocol<S: Into<String>>(msg: S, payload: Value) -> Self {
        Error::HandshakeProtocol {
            message: msg.into(),
            payload,
        }
    }

    /// Create a new attach validation error
    pub fn attach_validation<S: Into<String>>(msg: S) -> Self {
        Error::AttachValidation(msg.into())
    }

    /// Create a new unsupported command error
    pub fn unsupported_command<S: Into<String>>(command: S) -> Self {
        Error::UnsupportedCommand {
            command: command.into(),
        }
    }

    /// Create a new command invocation error
    pub fn command_invocation<S: Into<String>>(command: S, source: InvocationFailure) -> Self {
        Error::CommandInvocation {
            command: command.into(),
            source,
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new logging error
    pub fn logging<S: Into<String>>(msg: S) -> Self {
        Error::Logging(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether this error was raised locally, without any network round trip
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::Negotiation(_)
                | Error::AttachValidation(_)
                | Error::UnsupportedCommand { .. }
                | Error::InvalidArgument(_)
        )
    }

    /// Server diagnostic payload attached to this error, if any
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Error::HandshakeProtocol { payload, .. } => Some(payload),
            Error::CommandInvocation {
                source: InvocationFailure::Remote { payload, .. },
                ..
            } => Some(payload),
            _ => None,
        }
    }
}
