//! # Logging
//!
//! Level and output-path configuration applied by the session handshake.
//!
//! ## Module structure
//! - `traits`: `LogConfigurator`, `LogSettings`, `LogLevel`
//! - `subscriber`: `tracing-subscriber` implementation with a reloadable filter
//! - `mock`: recording implementation for tests

pub mod mock;
pub mod subscriber;
pub mod traits;

pub use mock::{JournalEntry, JournalLayer, LogJournal, RecordingLogConfigurator};
pub use subscriber::{OutputWriter, TracingLogConfigurator, LOG_FILE_NAME};
pub use traits::{LogConfigurator, LogLevel, LogSettings};
