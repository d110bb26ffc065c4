//! Session runtime: the per-connection state machine and the manager that
//! owns one state machine per logical user.

mod manager;
mod state;

pub use manager::SessionManager;
pub use state::{
    ChatEntry, ConnectionState, SessionState, STATUS_CONNECTED, STATUS_CONNECTING,
    STATUS_DISCONNECTED,
};
