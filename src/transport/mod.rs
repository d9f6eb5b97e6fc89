//! # Transport layer
//!
//! The request/response collaborator of the session core. The core only
//! ever calls [`Transport::send`]; connection pooling, timeouts and proxying
//! are the implementation's business.
//!
//! ## Module structure
//! - `traits`: the `Transport` trait and its value types
//! - `http`: `reqwest` implementation
//! - `mock`: scripted implementation for tests

pub mod http;
pub mod mock;
pub mod traits;

pub use http::{HttpOptions, HttpTransport};
pub use mock::{MockTransport, RecordedRequest};
pub use traits::{HttpMethod, Transport, TransportResponse};
