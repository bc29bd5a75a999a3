use priv_prelude::*;
use socket_addr::SocketAddrExt;

/// Extension methods for `UdpSocket`.
pub trait UdpSocketExt {
    /// Bind reusably to the given address. Multiple sockets can be bound to the same local
    /// address using this method, and the OS spreads incoming datagrams across them.
    fn bind_reusable(addr: &SocketAddr) -> Result<UdpSocket, ReuseError>;

    /// Bind reusably to `laddr` and connect the socket to `raddr`, so that `send`/`recv`
    /// exchange datagrams with that peer only.
    fn connect_reusable(laddr: &SocketAddr, raddr: &SocketAddr)
        -> Result<UdpSocket, ReuseError>;

    /// Returns all local addresses of this socket, expanding an unspecified address (eg
    /// `0.0.0.0`) into a vector of addresses, one for each network interface.
    fn expanded_local_addrs(&self) -> io::Result<Vec<SocketAddr>>;
}

impl UdpSocketExt for UdpSocket {
    fn bind_reusable(addr: &SocketAddr) -> Result<UdpSocket, ReuseError> {
        let builder = match addr.ip() {
            IpAddr::V4(..) => UdpBuilder::new_v4(),
            IpAddr::V6(..) => UdpBuilder::new_v6(),
        };
        let builder = builder.map_err(ReuseError::Create)?;
        sockopt::enable_reuse(&builder).map_err(ReuseError::SetSockOpt)?;
        let socket = builder.bind(addr).map_err(ReuseError::Create)?;
        trace!("bound reusably to {:?}", socket.local_addr());
        Ok(socket)
    }

    fn connect_reusable(laddr: &SocketAddr, raddr: &SocketAddr)
        -> Result<UdpSocket, ReuseError>
    {
        let socket = UdpSocket::bind_reusable(laddr)?;
        socket.connect(raddr).map_err(ReuseError::Create)?;
        Ok(socket)
    }

    fn expanded_local_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        let addr = self.local_addr()?;
        let addrs = addr.expand_local_unspecified()?;
        Ok(addrs)
    }
}
