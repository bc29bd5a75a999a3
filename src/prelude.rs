pub use addr::{resolve_addr, Addr, NetFamily};
pub use error::ReuseError;
pub use ip::{IpProtocol, RawIpSocket};
pub use ip_addr::{IpAddrExt, Ipv4AddrExt, Ipv6AddrExt};
pub use net::{dial, dial_timeout, listen, listen_packet};
pub use net::{Conn, Listener, PacketConn};
pub use socket_addr::SocketAddrExt;
pub use sockopt::ENABLED;
pub use tcp::builder::TcpBuilderExt;
pub use tcp::listener::TcpListenerExt;
pub use tcp::stream::TcpStreamExt;
pub use tls::{dial_tls, listen_tls, TlsClientStream, TlsListener, TlsServerStream};
pub use udp::socket::UdpSocketExt;
#[cfg(unix)]
pub use unix::{UnixDatagramExt, UnixListenerExt, UnixStreamExt};
