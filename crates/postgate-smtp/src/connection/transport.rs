//! Line-oriented transport over plaintext or TLS streams.

use crate::command::Command;
use crate::error::{Error, Result};
use crate::parser::{is_last_reply_line, parse_reply};
use crate::types::{Reply, ReplyCode};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

/// One side of the command/reply exchange.
///
/// Plaintext and TLS backings behave identically; the variant records which
/// phase of the session the stream belongs to. Commands and replies are
/// strictly interleaved by the session driver, never pipelined.
#[derive(Debug)]
pub enum Transport<P, S> {
    /// Plaintext stream, before the STARTTLS upgrade completes.
    Plain(BufReader<P>),
    /// TLS-upgraded stream.
    Secure(Box<BufReader<S>>),
}

impl<P, S> Transport<P, S>
where
    P: AsyncRead + AsyncWrite + Unpin + Send,
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wraps a freshly opened plaintext stream.
    pub fn plain(stream: P) -> Self {
        Self::Plain(BufReader::new(stream))
    }

    /// Wraps a TLS-upgraded stream.
    pub fn secure(stream: S) -> Self {
        Self::Secure(Box::new(BufReader::new(stream)))
    }

    /// Releases the plaintext stream for the TLS upgrade.
    ///
    /// Consumes the transport, so nothing can touch the plaintext stream
    /// after the handshake starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport is already using TLS.
    pub fn into_plain(self) -> Result<P> {
        match self {
            Self::Plain(reader) => Ok(reader.into_inner()),
            Self::Secure(_) => Err(Error::Protocol("connection is already using TLS".into())),
        }
    }

    /// Sends one command as a CRLF-terminated line.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn send(&mut self, command: &Command) -> Result<()> {
        tracing::trace!(command = command.name(), "command sent");
        self.write_all(&command.serialize()).await
    }

    /// Writes raw bytes and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        match self {
            Self::Plain(reader) => {
                reader.get_mut().write_all(data).await?;
                reader.get_mut().flush().await?;
            }
            Self::Secure(reader) => {
                reader.get_mut().write_all(data).await?;
                reader.get_mut().flush().await?;
            }
        }
        Ok(())
    }

    /// Reads one line, trimmed of trailing whitespace. `None` means the
    /// server closed the stream.
    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = match self {
            Self::Plain(reader) => reader.read_line(&mut line).await?,
            Self::Secure(reader) => reader.read_line(&mut line).await?,
        };

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end().to_string()))
    }

    /// Reads exactly one reply, consuming continuation lines.
    ///
    /// A read never retries; a closed stream is the failure
    /// "no response from server".
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the reply is malformed.
    pub async fn read_reply(&mut self) -> Result<Reply> {
        let mut lines = Vec::new();
        loop {
            let Some(line) = self.read_line().await? else {
                return Err(Error::Protocol("no response from server".into()));
            };
            if line.is_empty() {
                continue;
            }

            let last = is_last_reply_line(&line);
            lines.push(line);

            if last {
                break;
            }
        }

        let reply = parse_reply(&lines)?;
        tracing::trace!(code = reply.code.as_u16(), "reply received");
        Ok(reply)
    }

    /// Reads one reply and validates its code.
    ///
    /// # Errors
    ///
    /// A code mismatch aborts the session with the step's failure label and
    /// the raw reply text.
    pub async fn expect(&mut self, expect: ReplyCode, label: &'static str) -> Result<Reply> {
        let reply = self.read_reply().await?;
        if reply.code != expect {
            return Err(Error::step(label, reply.text()));
        }
        Ok(reply)
    }

    /// Best-effort shutdown of the underlying writer. Failures are ignored;
    /// the session outcome is already decided when this runs.
    pub async fn shutdown(&mut self) {
        let result = match self {
            Self::Plain(reader) => reader.get_mut().shutdown().await,
            Self::Secure(reader) => reader.get_mut().shutdown().await,
        };
        if let Err(error) = result {
            tracing::trace!(%error, "shutdown ignored");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokio::io::duplex;

    #[test]
    fn read_reply_consumes_continuation_lines() {
        let stream = Cursor::new(b"250-relay.example.com\r\n250-SIZE 1000\r\n250 STARTTLS\r\n".to_vec());
        let mut transport: Transport<_, Cursor<Vec<u8>>> = Transport::plain(stream);

        let reply = tokio_test::block_on(transport.read_reply()).unwrap();
        assert_eq!(reply.code, ReplyCode::OK);
        assert_eq!(reply.lines.len(), 3);
    }

    #[test]
    fn closed_stream_reports_no_response() {
        let stream = Cursor::new(Vec::new());
        let mut transport: Transport<_, Cursor<Vec<u8>>> = Transport::plain(stream);

        let err = tokio_test::block_on(transport.read_reply()).unwrap_err();
        assert!(err.to_string().contains("no response from server"));
    }

    #[test]
    fn expect_rejects_code_mismatch_with_label() {
        let stream = Cursor::new(b"500 error\r\n".to_vec());
        let mut transport: Transport<_, Cursor<Vec<u8>>> = Transport::plain(stream);

        let err = tokio_test::block_on(transport.expect(ReplyCode::OK, "EHLO failed")).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("EHLO failed"));
        assert!(text.contains("500 error"));
    }

    #[test]
    fn send_writes_crlf_terminated_line() {
        tokio_test::block_on(async {
            let (client, mut server) = duplex(256);
            let mut transport: Transport<_, Cursor<Vec<u8>>> = Transport::plain(client);

            transport.send(&Command::StartTls).await.unwrap();
            drop(transport);

            let mut sent = Vec::new();
            tokio::io::AsyncReadExt::read_to_end(&mut server, &mut sent)
                .await
                .unwrap();
            assert_eq!(sent, b"STARTTLS\r\n");
        });
    }
}
