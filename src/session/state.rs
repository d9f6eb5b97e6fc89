//! Session state snapshot

use crate::capabilities::CapabilityMap;
use crate::commands::CommandTable;
use crate::connection::ConnectionInfo;
use crate::environment::EnvironmentPredicates;

/// Everything a handshake produces; swapped as a whole on reload
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session_id: String,
    /// Capabilities returned by the remote end
    pub capabilities: CapabilityMap,
    pub environment: EnvironmentPredicates,
    /// Endpoint every command of the session targets
    pub connection: ConnectionInfo,
    pub table: CommandTable,
}
