//! Outgoing email model accepted from callers.

use serde::Deserialize;

/// Sender identity: display name plus address.
#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// One email submission, as handed to the service by a caller.
///
/// Mirrors the JSON body of the HTTP front end; `isHtml` and `from` are
/// optional and default to plain text and the configured account identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body, plain text or HTML markup.
    pub body: String,
    /// True when the body is HTML.
    #[serde(default)]
    pub is_html: bool,
    /// Optional explicit sender identity.
    #[serde(default)]
    pub from: Option<Sender>,
}
