use priv_prelude::*;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tcp::builder::TcpBuilderExt;

/// Extension methods for `TcpStream`.
pub trait TcpStreamExt {
    /// Connect to `raddr` from a socket bound reusably to `laddr`. The local port can be
    /// one that another socket (eg a listener) is already bound to.
    fn connect_reusable(laddr: &SocketAddr, raddr: &SocketAddr)
        -> Result<TcpStream, ReuseError>;

    /// The same as `connect_reusable`, except the connect attempt is abandoned with an
    /// error once `timeout` has elapsed.
    fn connect_reusable_timeout(
        laddr: &SocketAddr,
        raddr: &SocketAddr,
        timeout: Duration,
    ) -> Result<TcpStream, ReuseError>;
}

impl TcpStreamExt for TcpStream {
    fn connect_reusable(laddr: &SocketAddr, raddr: &SocketAddr)
        -> Result<TcpStream, ReuseError>
    {
        let builder = TcpBuilder::bind_reusable(laddr)?;
        let stream = builder.connect(raddr).map_err(ReuseError::Create)?;
        trace!("connected reusably, {:?} -> {}", stream.local_addr(), raddr);
        Ok(stream)
    }

    fn connect_reusable_timeout(
        laddr: &SocketAddr,
        raddr: &SocketAddr,
        timeout: Duration,
    ) -> Result<TcpStream, ReuseError> {
        // net2 has no bounded connect, so this path builds the socket directly.
        let domain = match laddr.ip() {
            IpAddr::V4(..) => Domain::IPV4,
            IpAddr::V6(..) => Domain::IPV6,
        };
        let socket =
            Socket::new(domain, Type::STREAM, Some(Protocol::TCP)).map_err(ReuseError::Create)?;
        sockopt::enable_reuse(&socket).map_err(ReuseError::SetSockOpt)?;
        socket
            .bind(&SockAddr::from(*laddr))
            .map_err(ReuseError::Create)?;
        socket
            .connect_timeout(&SockAddr::from(*raddr), timeout)
            .map_err(ReuseError::Create)?;
        socket.set_nonblocking(false).map_err(ReuseError::Create)?;
        trace!("connected reusably, {:?} -> {}", socket.local_addr(), raddr);
        Ok(socket.into())
    }
}
