//! SMTP reply parser.

use crate::error::{Error, Result};
use crate::types::{Reply, ReplyCode};

/// Parses an SMTP reply from received lines.
///
/// Replies can be single-line or multi-line:
/// - Single: `250 OK`
/// - Multi: `250-First line` ... `250 Last line`
///
/// The raw lines are kept on the reply so a failed validation can report
/// exactly what the server said.
///
/// # Errors
///
/// Returns an error if the reply is absent or malformed.
pub fn parse_reply(lines: &[String]) -> Result<Reply> {
    let first = lines
        .first()
        .ok_or_else(|| Error::Protocol("no response from server".into()))?;

    let code_str = first
        .get(0..3)
        .ok_or_else(|| Error::Protocol(format!("reply too short: {first}")))?;

    let code = code_str
        .parse::<u16>()
        .map_err(|_| Error::Protocol(format!("invalid reply code: {first}")))?;

    Ok(Reply::new(ReplyCode::new(code), lines.to_vec()))
}

/// Checks if a line terminates a (possibly multi-line) reply.
///
/// Continuation lines carry `-` after the code; anything else, including a
/// bare code with no text, ends the reply.
#[must_use]
pub fn is_last_reply_line(line: &str) -> bool {
    !(line.len() >= 4 && line.as_bytes()[3] == b'-')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_line_reply() {
        let lines = vec!["250 OK".to_string()];
        let reply = parse_reply(&lines).unwrap();
        assert_eq!(reply.code.as_u16(), 250);
        assert_eq!(reply.text(), "250 OK");
        assert!(reply.is_success());
    }

    #[test]
    fn test_parse_multi_line_reply() {
        let lines = vec![
            "250-relay.example.com".to_string(),
            "250-SIZE 35882577".to_string(),
            "250 STARTTLS".to_string(),
        ];
        let reply = parse_reply(&lines).unwrap();
        assert_eq!(reply.code.as_u16(), 250);
        assert_eq!(reply.lines.len(), 3);
    }

    #[test]
    fn test_parse_greeting() {
        let lines = vec!["220 relay.example.com ESMTP ready".to_string()];
        let reply = parse_reply(&lines).unwrap();
        assert_eq!(reply.code, ReplyCode::SERVICE_READY);
    }

    #[test]
    fn test_is_last_reply_line() {
        assert!(is_last_reply_line("250 OK"));
        assert!(!is_last_reply_line("250-Continuing"));
        assert!(is_last_reply_line("250"));
        assert!(is_last_reply_line("garbage"));
    }

    #[test]
    fn test_parse_error_empty() {
        assert!(parse_reply(&[]).is_err());
    }

    #[test]
    fn test_parse_error_too_short() {
        let lines = vec!["25".to_string()];
        assert!(parse_reply(&lines).is_err());
    }

    #[test]
    fn test_parse_error_invalid_code() {
        let lines = vec!["ABC OK".to_string()];
        assert!(parse_reply(&lines).is_err());
    }
}
