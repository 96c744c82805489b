//! The send operation: validation, composition, session orchestration and
//! the uniform outcome returned to every caller.

use crate::message::EmailMessage;
use postgate_mime::{BodyFormat, OutgoingMessage};
use postgate_smtp::{
    Address, Dial, Envelope, Error, Mailbox, Session, TlsDialer, TransportConfig,
};
use serde::Serialize;
use std::time::Duration;

/// Whole-session deadline. An unresponsive relay fails the send instead of
/// stalling it forever.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(60);

/// Uniform result of a send operation.
///
/// Every caller receives this shape; failures are carried as a descriptive
/// string, never as a fault.
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    /// True when the message was accepted by the relay.
    pub success: bool,
    /// Human-readable confirmation, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error description, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    fn delivered(to: &str) -> Self {
        Self {
            success: true,
            message: Some(format!("Email sent to {to}")),
            error: None,
        }
    }

    fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

/// Sends one email through the configured relay.
///
/// Never returns an error: every failure, including the session deadline,
/// is folded into the outcome.
pub async fn send_email(config: &TransportConfig, message: &EmailMessage) -> SendOutcome {
    send_email_with(&TlsDialer, config, message).await
}

/// [`send_email`], generic over the dialer so tests can substitute
/// scripted connections.
pub async fn send_email_with<D: Dial>(
    dialer: &D,
    config: &TransportConfig,
    message: &EmailMessage,
) -> SendOutcome {
    match tokio::time::timeout(SESSION_TIMEOUT, deliver(dialer, config, message)).await {
        Ok(Ok(())) => {
            tracing::info!(to = %message.to, "message delivered");
            SendOutcome::delivered(&message.to)
        }
        Ok(Err(error)) => {
            tracing::warn!(%error, to = %message.to, "delivery failed");
            SendOutcome::failed(error)
        }
        Err(_) => {
            tracing::warn!(to = %message.to, "session deadline exceeded");
            SendOutcome::failed(format!(
                "session timed out after {}s",
                SESSION_TIMEOUT.as_secs()
            ))
        }
    }
}

/// Validates, composes and drives one session.
async fn deliver<D: Dial>(
    dialer: &D,
    config: &TransportConfig,
    message: &EmailMessage,
) -> postgate_smtp::Result<()> {
    validate(message)?;

    let to = Address::new(&message.to)?;
    let sender = resolve_sender(config, message)?;

    let envelope = Envelope {
        from: sender.address.clone(),
        to: to.clone(),
    };

    let format = if message.is_html {
        BodyFormat::Html
    } else {
        BodyFormat::Plain
    };
    let payload = OutgoingMessage::new(
        sender.to_string(),
        &message.to,
        &message.subject,
        &message.body,
    )
    .format(format)
    .render(&config.host);

    Session::new(dialer, config).send(&envelope, &payload).await
}

/// Message-field preconditions, checked before any network activity.
fn validate(message: &EmailMessage) -> postgate_smtp::Result<()> {
    if message.to.trim().is_empty() {
        return Err(Error::Config("recipient address is required".into()));
    }
    if message.subject.trim().is_empty() {
        return Err(Error::Config("subject is required".into()));
    }
    if message.body.is_empty() {
        return Err(Error::Config("body is required".into()));
    }
    Ok(())
}

/// Explicit sender when given, otherwise the configured account identity.
fn resolve_sender(
    config: &TransportConfig,
    message: &EmailMessage,
) -> postgate_smtp::Result<Mailbox> {
    match &message.from {
        Some(sender) => Mailbox::with_name(&sender.name, &sender.email),
        None => Mailbox::new(&config.username),
    }
}
