//! Family-generic listen and dial entry points, and the connection types they return.
//!
//! These are thin dispatchers over the per-family extension methods: the requested local
//! address is resolved first, then the socket is created with the reuse options applied,
//! then bound (and connected, for the dial forms). A resolution failure never leaves a
//! socket open.

use addr;
use priv_prelude::*;
use std::io::{Read, Write};
use tcp::listener::TcpListenerExt;
use tcp::stream::TcpStreamExt;
use udp::socket::UdpSocketExt;

#[cfg(unix)]
use std::os::unix::net::{UnixDatagram, UnixListener, UnixStream};
#[cfg(unix)]
use unix::{UnixDatagramExt, UnixListenerExt, UnixStreamExt};

/// A reuse-enabled stream listener, as returned by `listen`.
#[derive(Debug)]
pub enum Listener {
    /// A TCP listener.
    Tcp(TcpListener),
    /// A Unix-domain stream listener.
    #[cfg(unix)]
    Unix(UnixListener),
}

impl Listener {
    /// Accept one incoming connection.
    pub fn accept(&self) -> io::Result<Conn> {
        match *self {
            Listener::Tcp(ref listener) => {
                listener.accept().map(|(stream, _)| Conn::Tcp(stream))
            }
            #[cfg(unix)]
            Listener::Unix(ref listener) => {
                listener.accept().map(|(stream, _)| Conn::Unix(stream))
            }
        }
    }

    /// The local address this listener is bound to.
    pub fn local_addr(&self) -> io::Result<Addr> {
        match *self {
            Listener::Tcp(ref listener) => listener.local_addr().map(Addr::Tcp),
            #[cfg(unix)]
            Listener::Unix(ref listener) => listener.local_addr().map(|addr| {
                Addr::Unix(
                    addr.as_pathname()
                        .map(|path| path.to_path_buf())
                        .unwrap_or_else(PathBuf::new),
                )
            }),
        }
    }
}

/// A reuse-enabled packet socket, as returned by `listen_packet`.
#[derive(Debug)]
pub enum PacketConn {
    /// A UDP socket.
    Udp(UdpSocket),
    /// A Unix-domain datagram socket.
    #[cfg(unix)]
    Unixgram(UnixDatagram),
}

fn family_mismatch() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        "address family does not match this socket",
    )
}

impl PacketConn {
    /// Send a packet to the given address. The address variant must match the socket's
    /// family.
    pub fn send_to(&self, buf: &[u8], addr: &Addr) -> io::Result<usize> {
        match (self, addr) {
            (&PacketConn::Udp(ref socket), &Addr::Udp(ref addr)) => socket.send_to(buf, addr),
            #[cfg(unix)]
            (&PacketConn::Unixgram(ref socket), &Addr::Unix(ref path)) => {
                socket.send_to(buf, path)
            }
            _ => Err(family_mismatch()),
        }
    }

    /// Receive one packet along with its sender's address.
    pub fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, Addr)> {
        match *self {
            PacketConn::Udp(ref socket) => socket
                .recv_from(buf)
                .map(|(n, addr)| (n, Addr::Udp(addr))),
            #[cfg(unix)]
            PacketConn::Unixgram(ref socket) => socket.recv_from(buf).map(|(n, addr)| {
                let path = addr
                    .as_pathname()
                    .map(|path| path.to_path_buf())
                    .unwrap_or_else(PathBuf::new);
                (n, Addr::Unix(path))
            }),
        }
    }

    /// The local address this socket is bound to.
    pub fn local_addr(&self) -> io::Result<Addr> {
        match *self {
            PacketConn::Udp(ref socket) => socket.local_addr().map(Addr::Udp),
            #[cfg(unix)]
            PacketConn::Unixgram(ref socket) => socket.local_addr().map(|addr| {
                Addr::Unix(
                    addr.as_pathname()
                        .map(|path| path.to_path_buf())
                        .unwrap_or_else(PathBuf::new),
                )
            }),
        }
    }
}

/// A reuse-enabled connection, as returned by `dial` and `Listener::accept`.
///
/// Stream variants read and write bytes; datagram variants map `Read`/`Write` onto
/// `recv`/`send` with the connected peer.
#[derive(Debug)]
pub enum Conn {
    /// A TCP connection.
    Tcp(TcpStream),
    /// A connected UDP socket.
    Udp(UdpSocket),
    /// A Unix-domain stream connection.
    #[cfg(unix)]
    Unix(UnixStream),
    /// A connected Unix-domain datagram socket.
    #[cfg(unix)]
    Unixgram(UnixDatagram),
}

impl Conn {
    /// The local address of this connection.
    pub fn local_addr(&self) -> io::Result<Addr> {
        match *self {
            Conn::Tcp(ref stream) => stream.local_addr().map(Addr::Tcp),
            Conn::Udp(ref socket) => socket.local_addr().map(Addr::Udp),
            #[cfg(unix)]
            Conn::Unix(ref stream) => stream.local_addr().map(|addr| {
                Addr::Unix(
                    addr.as_pathname()
                        .map(|path| path.to_path_buf())
                        .unwrap_or_else(PathBuf::new),
                )
            }),
            #[cfg(unix)]
            Conn::Unixgram(ref socket) => socket.local_addr().map(|addr| {
                Addr::Unix(
                    addr.as_pathname()
                        .map(|path| path.to_path_buf())
                        .unwrap_or_else(PathBuf::new),
                )
            }),
        }
    }
}

impl Read for Conn {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match *self {
            Conn::Tcp(ref mut stream) => stream.read(buf),
            Conn::Udp(ref socket) => socket.recv(buf),
            #[cfg(unix)]
            Conn::Unix(ref mut stream) => stream.read(buf),
            #[cfg(unix)]
            Conn::Unixgram(ref socket) => socket.recv(buf),
        }
    }
}

impl Write for Conn {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match *self {
            Conn::Tcp(ref mut stream) => stream.write(buf),
            Conn::Udp(ref socket) => socket.send(buf),
            #[cfg(unix)]
            Conn::Unix(ref mut stream) => stream.write(buf),
            #[cfg(unix)]
            Conn::Unixgram(ref socket) => socket.send(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match *self {
            Conn::Tcp(ref mut stream) => stream.flush(),
            #[cfg(unix)]
            Conn::Unix(ref mut stream) => stream.flush(),
            _ => Ok(()),
        }
    }
}

fn seqpacket_unsupported() -> ReuseError {
    ReuseError::Create(io::Error::new(
        io::ErrorKind::InvalidInput,
        "sequenced-packet sockets are not supported",
    ))
}

fn raw_ip_needs_protocol() -> ReuseError {
    ReuseError::Create(io::Error::new(
        io::ErrorKind::InvalidInput,
        "raw IP sockets carry an explicit protocol; use RawIpSocket",
    ))
}

/// Listen reusably for stream connections on the given family and address.
///
/// Only the stream families (`tcp`, `tcp4`, `tcp6`, `unix`) can listen this way; packet
/// families go through `listen_packet`.
pub fn listen(family: NetFamily, address: &str) -> Result<Listener, ReuseError> {
    match family {
        NetFamily::Tcp | NetFamily::Tcp4 | NetFamily::Tcp6 => {
            let addr = addr::resolve_socket_addr(family, address)?;
            TcpListener::listen_reusable(&addr).map(Listener::Tcp)
        }
        #[cfg(unix)]
        NetFamily::Unix => {
            let path = addr::resolve_path(address);
            UnixListener::listen_reusable(&path).map(Listener::Unix)
        }
        NetFamily::Unixpacket => Err(seqpacket_unsupported()),
        _ => Err(ReuseError::UnknownFamily(family.to_string())),
    }
}

/// Bind a reusable packet socket on the given family and address.
///
/// Supports the datagram families (`udp`, `udp4`, `udp6`, `unixgram`). The raw IP families
/// are refused here because the family tag names no IP protocol; use `RawIpSocket`.
pub fn listen_packet(family: NetFamily, address: &str) -> Result<PacketConn, ReuseError> {
    match family {
        NetFamily::Udp | NetFamily::Udp4 | NetFamily::Udp6 => {
            let addr = addr::resolve_socket_addr(family, address)?;
            UdpSocket::bind_reusable(&addr).map(PacketConn::Udp)
        }
        #[cfg(unix)]
        NetFamily::Unixgram => {
            let path = addr::resolve_path(address);
            UnixDatagram::bind_reusable(&path).map(PacketConn::Unixgram)
        }
        NetFamily::Ip | NetFamily::Ip4 | NetFamily::Ip6 => Err(raw_ip_needs_protocol()),
        _ => Err(ReuseError::UnknownFamily(family.to_string())),
    }
}

// An empty local address follows the remote's address family, so that eg
// dial(Tcp, "", "[::1]:80") binds a v6 socket.
fn resolve_local_socket_addr(
    family: NetFamily,
    local: &str,
    raddr: &SocketAddr,
) -> Result<SocketAddr, ReuseError> {
    if local.is_empty() {
        let ip = if raddr.is_ipv4() {
            IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))
        } else {
            IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0))
        };
        return Ok(SocketAddr::new(ip, 0));
    }
    addr::resolve_socket_addr(family, local)
}

#[cfg(unix)]
fn optional_path(path: &PathBuf) -> Option<&Path> {
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Dial `remote` from a socket bound reusably to `local`.
///
/// Both addresses are resolved before any socket is created. The local port can be one that
/// another socket is already bound to; dialing a remote equal to the chosen local endpoint
/// is not rejected here, the kernel's four-tuple rule refuses it at connect time.
pub fn dial(family: NetFamily, local: &str, remote: &str) -> Result<Conn, ReuseError> {
    dial_inner(family, local, remote, None)
}

/// The same as `dial`, except connection establishment is abandoned with an error once
/// `timeout` has elapsed.
///
/// The bound applies to the stream families; a datagram connect only records the peer and
/// does not block.
pub fn dial_timeout(
    family: NetFamily,
    local: &str,
    remote: &str,
    timeout: Duration,
) -> Result<Conn, ReuseError> {
    dial_inner(family, local, remote, Some(timeout))
}

fn dial_inner(
    family: NetFamily,
    local: &str,
    remote: &str,
    timeout: Option<Duration>,
) -> Result<Conn, ReuseError> {
    match family {
        NetFamily::Tcp | NetFamily::Tcp4 | NetFamily::Tcp6 => {
            let raddr = addr::resolve_socket_addr(family, remote)?;
            let laddr = resolve_local_socket_addr(family, local, &raddr)?;
            let stream = match timeout {
                Some(timeout) => TcpStream::connect_reusable_timeout(&laddr, &raddr, timeout)?,
                None => TcpStream::connect_reusable(&laddr, &raddr)?,
            };
            Ok(Conn::Tcp(stream))
        }
        NetFamily::Udp | NetFamily::Udp4 | NetFamily::Udp6 => {
            let raddr = addr::resolve_socket_addr(family, remote)?;
            let laddr = resolve_local_socket_addr(family, local, &raddr)?;
            UdpSocket::connect_reusable(&laddr, &raddr).map(Conn::Udp)
        }
        #[cfg(unix)]
        NetFamily::Unix => {
            let laddr = addr::resolve_path(local);
            let raddr = addr::resolve_path(remote);
            let stream = match timeout {
                Some(timeout) => UnixStream::connect_reusable_timeout(
                    optional_path(&laddr),
                    &raddr,
                    timeout,
                )?,
                None => UnixStream::connect_reusable(optional_path(&laddr), &raddr)?,
            };
            Ok(Conn::Unix(stream))
        }
        #[cfg(unix)]
        NetFamily::Unixgram => {
            let laddr = addr::resolve_path(local);
            let raddr = addr::resolve_path(remote);
            UnixDatagram::connect_reusable(optional_path(&laddr), &raddr)
                .map(Conn::Unixgram)
        }
        NetFamily::Ip | NetFamily::Ip4 | NetFamily::Ip6 => Err(raw_ip_needs_protocol()),
        NetFamily::Unixpacket => Err(seqpacket_unsupported()),
        #[cfg(not(unix))]
        _ => Err(ReuseError::UnknownFamily(family.to_string())),
    }
}
