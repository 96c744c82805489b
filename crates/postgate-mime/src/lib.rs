//! # postgate-mime
//!
//! Composition of outgoing RFC 5322 messages: an ordered header block,
//! content headers selected by body format, Date and Message-ID stamping,
//! and rendering into the payload handed to the SMTP DATA phase.
//!
//! ## Modules
//!
//! - [`content`]: body format and transfer encoding
//! - [`header`]: ordered header block
//! - [`message`]: the outgoing message and its renderer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod content;
pub mod header;
pub mod message;

pub use content::{BodyFormat, TransferEncoding};
pub use header::Headers;
pub use message::OutgoingMessage;
