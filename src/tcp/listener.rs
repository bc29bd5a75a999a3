use priv_prelude::*;
use socket_addr::SocketAddrExt;
use tcp::builder::TcpBuilderExt;

/// Extension methods for `TcpListener`.
pub trait TcpListenerExt {
    /// Listen reusably on the given address. Multiple listeners can be bound to the same
    /// local address using this method, and the OS spreads incoming connections across
    /// them.
    fn listen_reusable(addr: &SocketAddr) -> Result<TcpListener, ReuseError>;

    /// Returns all local addresses of this socket, expanding an unspecified address (eg
    /// `0.0.0.0`) into a vector of addresses, one for each network interface.
    fn expanded_local_addrs(&self) -> io::Result<Vec<SocketAddr>>;
}

impl TcpListenerExt for TcpListener {
    fn listen_reusable(addr: &SocketAddr) -> Result<TcpListener, ReuseError> {
        let builder = TcpBuilder::bind_reusable(addr)?;
        let listener = builder.listen(1024).map_err(ReuseError::Create)?;
        trace!("listening reusably on {:?}", listener.local_addr());
        Ok(listener)
    }

    fn expanded_local_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        let addr = self.local_addr()?;
        let addrs = addr.expand_local_unspecified()?;
        Ok(addrs)
    }
}
