//! Email services.

mod send;

pub use send::{SESSION_TIMEOUT, SendOutcome, send_email, send_email_with};
