//! TLS-secured variants of the generic listen and dial entry points.
//!
//! The reuse-enabled transport is established first, exactly as by `listen`/`dial`; rustls
//! is layered on top of it. Session configuration is entirely the caller's.

use net::{self, Conn, Listener};
use priv_prelude::*;
use rustls::{ClientConfig, ClientConnection, ServerConfig, ServerConnection, ServerName};
use rustls::StreamOwned;

/// A server-side TLS stream over a reuse-enabled connection.
pub type TlsServerStream = StreamOwned<ServerConnection, Conn>;

/// A client-side TLS stream over a reuse-enabled connection.
pub type TlsClientStream = StreamOwned<ClientConnection, Conn>;

/// A reuse-enabled stream listener whose accepted connections speak TLS.
pub struct TlsListener {
    listener: Listener,
    config: Arc<ServerConfig>,
}

impl TlsListener {
    /// Accept one incoming connection. The TLS handshake completes during the first read
    /// or write on the returned stream.
    pub fn accept(&self) -> Result<TlsServerStream, ReuseError> {
        let conn = self.listener.accept().map_err(ReuseError::Create)?;
        let session = ServerConnection::new(self.config.clone()).map_err(ReuseError::Tls)?;
        Ok(StreamOwned::new(session, conn))
    }

    /// The local address this listener is bound to.
    pub fn local_addr(&self) -> io::Result<Addr> {
        self.listener.local_addr()
    }
}

/// Listen reusably on the given family and address, wrapping every accepted connection in
/// a TLS server session using `config`.
pub fn listen_tls(
    family: NetFamily,
    address: &str,
    config: Arc<ServerConfig>,
) -> Result<TlsListener, ReuseError> {
    let listener = net::listen(family, address)?;
    Ok(TlsListener {
        listener: listener,
        config: config,
    })
}

/// Dial `remote` from a socket bound reusably to `local` and run a TLS client handshake
/// over the connection. The returned stream is established and encrypted; `name` is the
/// server name the peer's certificate is verified against.
pub fn dial_tls(
    family: NetFamily,
    local: &str,
    remote: &str,
    config: Arc<ClientConfig>,
    name: ServerName,
) -> Result<TlsClientStream, ReuseError> {
    let mut conn = net::dial(family, local, remote)?;
    let mut session = ClientConnection::new(config, name).map_err(ReuseError::Tls)?;
    while session.is_handshaking() {
        session
            .complete_io(&mut conn)
            .map_err(ReuseError::Handshake)?;
    }
    trace!("tls handshake complete, {:?}", conn.local_addr());
    Ok(StreamOwned::new(session, conn))
}
