//! The delivery state machine.
//!
//! One [`Session`] drives one message through the full submission sequence:
//! reachability probe, plaintext preamble, STARTTLS upgrade, AUTH LOGIN,
//! envelope, payload, QUIT. The command sequence is data: two step tables
//! around the TLS upgrade, consumed by a single driver loop, so the whole
//! state machine is auditable in one place.

use crate::command::Command;
use crate::connection::{Dial, Transport};
use crate::error::{Error, Result};
use crate::types::{Envelope, ReplyCode, TransportConfig};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Hostname the client announces in EHLO, before and after the upgrade.
const EHLO_HOSTNAME: &str = "localhost";

/// One element of the fixed command sequence.
struct Step {
    /// Command to issue, or `None` for read-only steps (the greeting).
    command: Option<Command>,
    /// Reply code the step must receive.
    expect: ReplyCode,
    /// Failure label carried into diagnostics.
    label: &'static str,
}

impl Step {
    const fn send(command: Command, expect: ReplyCode, label: &'static str) -> Self {
        Self {
            command: Some(command),
            expect,
            label,
        }
    }

    const fn read(expect: ReplyCode, label: &'static str) -> Self {
        Self {
            command: None,
            expect,
            label,
        }
    }
}

/// Drives one complete delivery over a dialer.
///
/// A session owns exactly one connection for its lifetime and never reuses
/// it; every exit path, success or failure, releases the socket by drop.
#[derive(Debug)]
pub struct Session<'a, D: Dial> {
    dialer: &'a D,
    config: &'a TransportConfig,
}

impl<'a, D: Dial> Session<'a, D> {
    /// Creates a session over a dialer and a fully resolved configuration.
    #[must_use]
    pub const fn new(dialer: &'a D, config: &'a TransportConfig) -> Self {
        Self { dialer, config }
    }

    /// Submits one rendered message to the relay.
    ///
    /// The payload is the RFC 5322 header/body text produced by the
    /// composer; this method handles dot-stuffing and the terminating dot
    /// line itself.
    ///
    /// # Errors
    ///
    /// Returns the first failure encountered; no step is retried and no
    /// command is issued after a failed gate.
    pub async fn send(&self, envelope: &Envelope, payload: &str) -> Result<()> {
        self.config.validate()?;
        self.probe().await?;

        let stream = self
            .dialer
            .dial(&self.config.host, self.config.port)
            .await?;
        let mut plain = Transport::<D::Plain, D::Secure>::plain(stream);
        tracing::debug!(host = %self.config.host, port = self.config.port, "connected");

        run_steps(&mut plain, &self.plaintext_steps()).await?;

        tracing::debug!("starting TLS upgrade");
        let upgraded = self
            .dialer
            .upgrade(plain.into_plain()?, &self.config.host)
            .await?;
        let mut secure = Transport::<D::Plain, D::Secure>::secure(upgraded);
        tracing::debug!("TLS established");

        run_steps(&mut secure, &self.secure_steps(envelope)).await?;

        write_payload(&mut secure, payload).await?;
        secure
            .expect(ReplyCode::OK, "message delivery failed")
            .await?;
        tracing::debug!(to = %envelope.to, "message accepted");

        // The outcome is decided; QUIT and teardown are best effort.
        if secure.send(&Command::Quit).await.is_ok() {
            let _ = secure.read_reply().await;
        }
        secure.shutdown().await;

        Ok(())
    }

    /// Throwaway connectivity probe: opened, then dropped, with no commands
    /// exchanged.
    async fn probe(&self) -> Result<()> {
        tracing::debug!(host = %self.config.host, port = self.config.port, "probing relay");
        self.dialer
            .dial(&self.config.host, self.config.port)
            .await
            .map_err(Error::Unreachable)?;
        Ok(())
    }

    /// Steps exchanged before the TLS upgrade.
    fn plaintext_steps(&self) -> Vec<Step> {
        vec![
            Step::read(ReplyCode::SERVICE_READY, "greeting failed"),
            Step::send(
                Command::Ehlo {
                    hostname: EHLO_HOSTNAME.to_string(),
                },
                ReplyCode::OK,
                "EHLO failed",
            ),
            Step::send(
                Command::StartTls,
                ReplyCode::SERVICE_READY,
                "STARTTLS failed",
            ),
        ]
    }

    /// Steps exchanged inside the encrypted channel. The second EHLO is a
    /// protocol requirement: capabilities advertised in the plaintext
    /// preamble cannot be trusted.
    fn secure_steps(&self, envelope: &Envelope) -> Vec<Step> {
        vec![
            Step::send(
                Command::Ehlo {
                    hostname: EHLO_HOSTNAME.to_string(),
                },
                ReplyCode::OK,
                "EHLO failed",
            ),
            Step::send(
                Command::AuthLogin,
                ReplyCode::AUTH_CONTINUE,
                "AUTH LOGIN failed",
            ),
            Step::send(
                Command::AuthResponse {
                    payload: BASE64.encode(self.config.username.as_bytes()),
                },
                ReplyCode::AUTH_CONTINUE,
                "AUTH username failed",
            ),
            Step::send(
                Command::AuthResponse {
                    payload: BASE64.encode(self.config.password.as_bytes()),
                },
                ReplyCode::AUTH_ACCEPTED,
                "AUTH password failed",
            ),
            Step::send(
                Command::MailFrom {
                    from: envelope.from.clone(),
                },
                ReplyCode::OK,
                "MAIL FROM failed",
            ),
            Step::send(
                Command::RcptTo {
                    to: envelope.to.clone(),
                },
                ReplyCode::OK,
                "RCPT TO failed",
            ),
            Step::send(Command::Data, ReplyCode::START_DATA, "DATA failed"),
        ]
    }
}

/// Runs steps in order, lock-step: one command out, one validated reply in.
async fn run_steps<P, S>(transport: &mut Transport<P, S>, steps: &[Step]) -> Result<()>
where
    P: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send,
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send,
{
    for step in steps {
        if let Some(command) = &step.command {
            transport.send(command).await?;
        }
        transport.expect(step.expect, step.label).await?;
    }
    Ok(())
}

/// Writes the message payload for the DATA phase: CRLF line endings,
/// byte-stuffed leading dots, terminating dot line.
async fn write_payload<P, S>(transport: &mut Transport<P, S>, payload: &str) -> Result<()>
where
    P: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send,
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send,
{
    for line in payload.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.starts_with('.') {
            transport.write_all(b".").await?;
        }
        transport.write_all(line.as_bytes()).await?;
        transport.write_all(b"\r\n").await?;
    }

    transport.write_all(b".\r\n").await?;
    Ok(())
}
