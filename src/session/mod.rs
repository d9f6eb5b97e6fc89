//! # Session layer
//!
//! Creates sessions through the handshake, attaches to existing ones and
//! exposes the environment-filtered command table as callable operations.
//!
//! ## Core concepts
//! - **WebDriverClient**: entry point holding the shared collaborators
//! - **Session**: clonable handle whose state a reload replaces in place
//! - **Command**: a table entry bound to a session at call time
//!
//! ## Module structure
//! - `options`: `NewSessionOptions` and `AttachOptions`
//! - `handshake`: new-session and attach paths
//! - `state`: the state snapshot a handshake produces
//! - `handle`: `Session` and `Command`
//! - `client`: `WebDriverClient`
//!
//! ## Example
//! ```rust,no_run
//! use webdriver_session::capabilities::CapabilitySpec;
//! use webdriver_session::session::{NewSessionOptions, WebDriverClient};
//! use webdriver_session::Config;
//! use serde_json::json;
//!
//! # async fn example() -> webdriver_session::Result<()> {
//! let config = Config::from_env()?;
//! let client = WebDriverClient::from_config(&config)?;
//!
//! let capabilities = CapabilitySpec::from_value(json!({ "browserName": "firefox" }))?;
//! let session = client
//!     .new_session(NewSessionOptions::from_config(&config, capabilities)?)
//!     .await?;
//!
//! session.call("navigateTo", &[json!("https://example.com")]).await?;
//! let title = session.call("getTitle", &[]).await?;
//! println!("Title: {}", title);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod handle;
mod handshake;
pub mod options;
pub mod state;

#[cfg(test)]
mod tests;

pub use client::WebDriverClient;
pub use handle::{Command, Session};
pub use options::{AttachOptions, NewSessionOptions};
pub use state::SessionState;
