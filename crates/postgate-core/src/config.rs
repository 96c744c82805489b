//! Relay configuration resolved from the environment.

use postgate_smtp::TransportConfig;
use std::env;

/// Relay host used when `SMTP_HOST` is not set.
pub const DEFAULT_HOST: &str = "smtp.gmail.com";

/// Submission port used when `SMTP_PORT` is not set or unparseable.
pub const DEFAULT_PORT: u16 = 587;

/// Resolves the transport configuration from the environment.
///
/// Host and port fall back to the defaults above; `SMTP_USERNAME` and
/// `SMTP_PASSWORD` have no defaults and resolve to empty strings when
/// unset. Validation of the resolved values happens inside the session,
/// before any connection is opened.
#[must_use]
pub fn from_env() -> TransportConfig {
    TransportConfig {
        host: env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
        port: env::var("SMTP_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT),
        username: env::var("SMTP_USERNAME").unwrap_or_default(),
        password: env::var("SMTP_PASSWORD").unwrap_or_default(),
    }
}
