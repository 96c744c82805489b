//! Relay endpoint configuration.

use crate::error::{Error, Result};

/// Fully resolved relay endpoint and credentials.
///
/// Callers resolve defaults before constructing this; the session performs
/// no defaulting of its own.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Relay hostname.
    pub host: String,
    /// Submission port.
    pub port: u16,
    /// AUTH LOGIN username.
    pub username: String,
    /// AUTH LOGIN password.
    pub password: String,
}

impl TransportConfig {
    /// Checks that every field required to drive a session is present.
    ///
    /// Runs before any connection is opened, so a missing credential never
    /// causes network traffic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("SMTP host is required".into()));
        }
        if self.port == 0 {
            return Err(Error::Config("SMTP port must be 1-65535".into()));
        }
        if self.username.trim().is_empty() {
            return Err(Error::Config("SMTP username is required".into()));
        }
        if self.password.is_empty() {
            return Err(Error::Config("SMTP password is required".into()));
        }
        Ok(())
    }
}
