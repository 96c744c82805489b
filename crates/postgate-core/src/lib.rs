//! # postgate-core
//!
//! Service layer for the postgate mail submission service.
//!
//! This crate provides:
//! - The [`EmailMessage`] model callers hand in
//! - Environment-based relay configuration with documented defaults
//! - The [`send_email`] operation: validation, composition, one SMTP
//!   session, and a uniform [`SendOutcome`] whatever happens

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod message;
pub mod service;

pub use message::{EmailMessage, Sender};
pub use postgate_smtp::TransportConfig;
pub use service::{SESSION_TIMEOUT, SendOutcome, send_email, send_email_with};
