//! Core SMTP types.

mod address;
mod config;
mod reply;

pub use address::{Address, Envelope, Mailbox};
pub use config::TransportConfig;
pub use reply::{Reply, ReplyCode};
