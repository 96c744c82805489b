//! Connection establishment and in-place TLS upgrade.

use crate::error::{Error, Result};
use rustls::pki_types::ServerName;
use std::future::Future;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::{
    TlsConnector,
    rustls::{ClientConfig, RootCertStore},
};

/// Capability for opening connections and upgrading them to TLS.
///
/// The session holds one implementation for both the reachability probe and
/// the real connection; tests substitute scripted streams.
pub trait Dial: Send + Sync {
    /// Plaintext stream type.
    type Plain: AsyncRead + AsyncWrite + Unpin + Send;
    /// TLS-upgraded stream type.
    type Secure: AsyncRead + AsyncWrite + Unpin + Send;

    /// Opens a plaintext connection to `host:port`.
    fn dial(
        &self,
        host: &str,
        port: u16,
    ) -> impl Future<Output = io::Result<Self::Plain>> + Send;

    /// Upgrades an established plaintext stream to TLS over the same
    /// socket. The plaintext stream is consumed; it must never be used
    /// again once the upgrade begins.
    fn upgrade(
        &self,
        stream: Self::Plain,
        host: &str,
    ) -> impl Future<Output = Result<Self::Secure>> + Send;
}

/// Production dialer: TCP plus rustls with webpki roots.
#[derive(Debug, Clone, Copy, Default)]
pub struct TlsDialer;

impl Dial for TlsDialer {
    type Plain = TcpStream;
    type Secure = tokio_rustls::client::TlsStream<TcpStream>;

    async fn dial(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        TcpStream::connect((host, port)).await
    }

    async fn upgrade(
        &self,
        stream: TcpStream,
        host: &str,
    ) -> Result<tokio_rustls::client::TlsStream<TcpStream>> {
        let connector = tls_connector();
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|_| Error::Protocol(format!("invalid hostname: {host}")))?;

        Ok(connector.connect(server_name, stream).await?)
    }
}

/// Creates a TLS connector with the bundled webpki root certificates.
fn tls_connector() -> TlsConnector {
    let root_store = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    TlsConnector::from(Arc::new(config))
}
