//! # Command layer
//!
//! Filters the static registry into a per-session [`CommandTable`] and
//! dispatches table entries through the transport.
//!
//! ## Module structure
//! - `table`: table construction from registry and environment
//! - `invoke`: argument binding, dispatch and response unwrapping

pub mod invoke;
pub mod table;


pub use invoke::{bind, invoke, unwrap_response, BoundRequest};
pub use table::{build, CommandTable};
