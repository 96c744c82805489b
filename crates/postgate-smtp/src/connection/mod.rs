//! Connection management: dialing, TLS upgrade and the line transport.

mod dial;
mod transport;

pub use dial::{Dial, TlsDialer};
pub use transport::Transport;
