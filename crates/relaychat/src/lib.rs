//! Top-level facade crate for relaychat.
//!
//! Re-exports the envelope core and the client runtime so users can depend on a single crate.

pub mod core {
    pub use relaychat_core::*;
}

pub mod client {
    pub use relaychat_client::*;
}
