//! # postgate-smtp
//!
//! SMTP submission engine for a single message: STARTTLS upgrade, AUTH
//! LOGIN and lock-step command/reply sequencing over one connection.
//!
//! ## Features
//!
//! - **Fixed sequence as data**: the protocol is two step tables (plaintext
//!   preamble, encrypted phase) around the TLS upgrade, consumed by one
//!   driver loop
//! - **In-band TLS**: STARTTLS over the same socket, with a mandatory
//!   second EHLO inside the encrypted channel
//! - **Injectable dialing**: connection opening and TLS upgrade live behind
//!   the [`Dial`] capability, so tests drive the engine with scripted
//!   streams
//! - **Strict lock-step**: exactly one validated reply per command, no
//!   pipelining, no retries
//!
//! ## Quick Start
//!
//! ```ignore
//! use postgate_smtp::{Address, Envelope, Session, TlsDialer, TransportConfig};
//!
//! #[tokio::main]
//! async fn main() -> postgate_smtp::Result<()> {
//!     let config = TransportConfig {
//!         host: "smtp.example.com".to_string(),
//!         port: 587,
//!         username: "user@example.com".to_string(),
//!         password: "secret".to_string(),
//!     };
//!
//!     let envelope = Envelope {
//!         from: Address::new("user@example.com")?,
//!         to: Address::new("recipient@example.com")?,
//!     };
//!
//!     let payload = "Subject: Test\r\n\r\nHello, World!";
//!
//!     let dialer = TlsDialer;
//!     Session::new(&dialer, &config).send(&envelope, payload).await
//! }
//! ```
//!
//! ## Modules
//!
//! - [`command`]: SMTP command builder
//! - [`connection`]: dialing, TLS upgrade and the line transport
//! - [`parser`]: reply parser
//! - [`session`]: the delivery state machine
//! - [`types`]: addresses, replies and configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod parser;
pub mod session;
pub mod types;

pub use command::Command;
pub use connection::{Dial, TlsDialer, Transport};
pub use error::{Error, Result};
pub use session::Session;
pub use types::{Address, Envelope, Mailbox, Reply, ReplyCode, TransportConfig};
