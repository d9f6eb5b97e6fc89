//! webdriver-session: WebDriver client core
//!
//! Negotiates sessions with a remote WebDriver end in either the legacy
//! JSONWire or the W3C dialect, detects the environment the remote end runs,
//! and exposes exactly the commands that environment can serve.

pub mod config;
pub mod error;

pub mod capabilities;
pub mod commands;
pub mod connection;
pub mod environment;
pub mod logging;
pub mod protocol;
pub mod session;
pub mod transport;

// Re-exports
pub use crate::config::Config;
pub use error::{Error, Result};
pub use session::{AttachOptions, Command, NewSessionOptions, Session, WebDriverClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
