//! Outgoing message composition.

use crate::content::{BodyFormat, TransferEncoding};
use crate::header::Headers;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A single outgoing email, ready to be rendered into a wire payload.
///
/// Header values are taken as given; the From value is expected to be
/// already formatted (`Name <addr>` or a bare address).
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    /// From header value.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body, plain text or HTML per `format`.
    pub body: String,
    /// Body format; selects the content headers.
    pub format: BodyFormat,
}

impl OutgoingMessage {
    /// Creates a plain-text message.
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            format: BodyFormat::Plain,
        }
    }

    /// Sets the body format.
    #[must_use]
    pub const fn format(mut self, format: BodyFormat) -> Self {
        self.format = format;
        self
    }

    /// Renders headers and body into the RFC 5322 payload handed to the
    /// DATA phase: CRLF-joined headers, a blank line, then the body.
    ///
    /// Date and Message-ID are stamped at render time, so rendering the
    /// same message twice produces two distinct payloads.
    #[must_use]
    pub fn render(&self, message_id_domain: &str) -> String {
        let mut headers = Headers::new();
        headers.add("From", &self.from);
        headers.add("To", &self.to);
        headers.add("Subject", &self.subject);
        headers.add("Date", Utc::now().to_rfc2822());
        headers.add("Message-ID", generate_message_id(message_id_domain));
        headers.add("MIME-Version", "1.0");
        headers.add("Content-Type", self.format.content_type());
        headers.add(
            "Content-Transfer-Encoding",
            TransferEncoding::EightBit.to_string(),
        );

        format!("{}\r\n{}", headers.render(), self.body)
    }
}

/// Generates a unique, host-qualified Message-ID.
///
/// The timestamp alone can collide for back-to-back sends inside one
/// scheduler tick; the process-wide counter keeps consecutive IDs distinct.
fn generate_message_id(domain: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let stamp = Utc::now().timestamp_micros();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("<{stamp}.{seq}@{domain}>")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn message() -> OutgoingMessage {
        OutgoingMessage::new("Sender <s@example.com>", "a@b.com", "S", "B")
    }

    #[test]
    fn plain_message_selects_text_plain() {
        let payload = message().render("relay.example.com");

        assert!(payload.contains("Content-Type: text/plain; charset=UTF-8\r\n"));
        assert!(!payload.contains("Content-Type: text/html"));
        assert!(payload.contains("Content-Transfer-Encoding: 8bit\r\n"));
    }

    #[test]
    fn html_message_selects_text_html() {
        let payload = message()
            .format(BodyFormat::Html)
            .render("relay.example.com");

        assert!(payload.contains("Content-Type: text/html; charset=UTF-8\r\n"));
        assert!(!payload.contains("Content-Type: text/plain"));
    }

    #[test]
    fn headers_are_separated_from_body_by_a_blank_line() {
        let payload = message().render("relay.example.com");

        assert!(payload.ends_with("\r\n\r\nB"));
        assert!(payload.starts_with("From: Sender <s@example.com>\r\n"));
        assert!(payload.contains("To: a@b.com\r\n"));
        assert!(payload.contains("Subject: S\r\n"));
        assert!(payload.contains("MIME-Version: 1.0\r\n"));
    }

    #[test]
    fn message_id_is_host_qualified_and_unique() {
        let first = message().render("relay.example.com");
        let second = message().render("relay.example.com");

        let id = |payload: &str| {
            payload
                .lines()
                .find_map(|l| l.strip_prefix("Message-ID: "))
                .map(str::to_string)
                .unwrap()
        };

        let (a, b) = (id(&first), id(&second));
        assert!(a.starts_with('<') && a.trim_end().ends_with("@relay.example.com>"));
        assert_ne!(a, b);
    }

    #[test]
    fn date_header_is_rfc2822() {
        let payload = message().render("relay.example.com");
        let date = payload
            .lines()
            .find_map(|l| l.strip_prefix("Date: "))
            .unwrap();

        assert!(chrono::DateTime::parse_from_rfc2822(date.trim_end()).is_ok());
    }

    proptest! {
        #[test]
        fn message_ids_never_repeat(domain in "[a-z]{1,12}\\.[a-z]{2,4}") {
            let a = generate_message_id(&domain);
            let b = generate_message_id(&domain);
            prop_assert_ne!(a, b);
        }
    }
}
