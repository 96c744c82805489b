//! Error types for delivery sessions.

use std::io;

/// Result type alias for SMTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while driving a delivery session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required configuration is missing or malformed. Raised before any
    /// network activity.
    #[error("configuration error: {0}")]
    Config(String),

    /// The relay could not be reached during the connectivity probe.
    #[error("server unreachable: {0}")]
    Unreachable(#[source] io::Error),

    /// A protocol step received a reply with an unexpected code.
    #[error("{label}: {response}")]
    Step {
        /// Failure label of the step (e.g. "EHLO failed").
        label: &'static str,
        /// Raw reply text from the server.
        response: String,
    },

    /// The server closed the stream or produced an unparseable reply.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// I/O error on the underlying connection.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TLS handshake or channel error.
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// Invalid email address.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
}

impl Error {
    /// Creates a step failure from a label and the raw server text.
    #[must_use]
    pub fn step(label: &'static str, response: impl Into<String>) -> Self {
        Self::Step {
            label,
            response: response.into(),
        }
    }

    /// Returns true if the failure happened during the AUTH exchange.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Step { label, .. } if label.starts_with("AUTH"))
    }
}
