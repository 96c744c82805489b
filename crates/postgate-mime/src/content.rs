//! Content metadata for composed messages.

use std::fmt;

/// Body format selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyFormat {
    /// Plain UTF-8 text.
    #[default]
    Plain,
    /// HTML markup.
    Html,
}

impl BodyFormat {
    /// Content-Type header value for this format. Exactly one of the two
    /// values ever appears in a composed message.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Plain => "text/plain; charset=UTF-8",
            Self::Html => "text/html; charset=UTF-8",
        }
    }
}

/// Transfer encoding applied to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferEncoding {
    /// 7-bit ASCII.
    SevenBit,
    /// 8-bit binary.
    #[default]
    EightBit,
    /// Base64 encoding.
    Base64,
    /// Quoted-Printable encoding.
    QuotedPrintable,
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SevenBit => write!(f, "7bit"),
            Self::EightBit => write!(f, "8bit"),
            Self::Base64 => write!(f, "base64"),
            Self::QuotedPrintable => write!(f, "quoted-printable"),
        }
    }
}
