//! Reusable raw IP sockets.

use priv_prelude::*;
use socket2::{Domain, SockAddr, Socket, Type};
use std::io::{Read, Write};

/// The IP protocol number a raw socket sends and receives.
///
/// Raw sockets always carry an explicit protocol; the family tag alone does not name one,
/// which is why the string-keyed entry points cannot create them.
pub use socket2::Protocol as IpProtocol;

/// A raw IP socket with the reuse options applied.
///
/// Raw sockets require elevated privileges on most systems; a refusal surfaces as an
/// ordinary creation error.
#[derive(Debug)]
pub struct RawIpSocket {
    socket: Socket,
}

fn ip_sockaddr(ip: &IpAddr) -> SockAddr {
    SockAddr::from(SocketAddr::new(*ip, 0))
}

impl RawIpSocket {
    fn new_reusable(ip: &IpAddr, protocol: IpProtocol) -> Result<RawIpSocket, ReuseError> {
        let domain = match *ip {
            IpAddr::V4(..) => Domain::IPV4,
            IpAddr::V6(..) => Domain::IPV6,
        };
        let socket =
            Socket::new(domain, Type::RAW, Some(protocol)).map_err(ReuseError::Create)?;
        sockopt::enable_reuse(&socket).map_err(ReuseError::SetSockOpt)?;
        Ok(RawIpSocket { socket: socket })
    }

    /// Create a raw IP socket bound reusably to the given address, receiving `protocol`
    /// packets.
    pub fn bind_reusable(addr: &IpAddr, protocol: IpProtocol)
        -> Result<RawIpSocket, ReuseError>
    {
        let socket = RawIpSocket::new_reusable(addr, protocol)?;
        socket
            .socket
            .bind(&ip_sockaddr(addr))
            .map_err(ReuseError::Create)?;
        trace!("bound reusably to {:?}", addr);
        Ok(socket)
    }

    /// Create a raw IP socket bound reusably to `laddr` and narrowed to the peer `raddr`,
    /// so that `send`/`recv` exchange `protocol` packets with that host only.
    pub fn connect_reusable(
        laddr: &IpAddr,
        raddr: &IpAddr,
        protocol: IpProtocol,
    ) -> Result<RawIpSocket, ReuseError> {
        let socket = RawIpSocket::bind_reusable(laddr, protocol)?;
        socket
            .socket
            .connect(&ip_sockaddr(raddr))
            .map_err(ReuseError::Create)?;
        Ok(socket)
    }

    /// Send a packet to the connected peer.
    pub fn send(&self, buf: &[u8]) -> io::Result<usize> {
        (&self.socket).write(buf)
    }

    /// Receive a packet. For a connected socket only packets from the peer arrive.
    pub fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        (&self.socket).read(buf)
    }

    /// Send a packet to the given host.
    pub fn send_to(&self, buf: &[u8], addr: &IpAddr) -> io::Result<usize> {
        self.socket.send_to(buf, &ip_sockaddr(addr))
    }

    /// The local address this socket is bound to.
    pub fn local_addr(&self) -> io::Result<IpAddr> {
        let addr = self.socket.local_addr()?;
        match addr.as_socket() {
            Some(addr) => Ok(addr.ip()),
            None => Err(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "socket has no IP address",
            )),
        }
    }
}

impl Read for RawIpSocket {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (&self.socket).read(buf)
    }
}

impl Write for RawIpSocket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&self.socket).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
