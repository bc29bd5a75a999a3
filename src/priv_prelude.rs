pub use addr::{Addr, NetFamily};
pub use error::ReuseError;
pub(crate) use sockopt;

pub use net2::{TcpBuilder, UdpBuilder};

pub use std::{fmt, io};
pub use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
pub use std::net::{SocketAddr, TcpListener, TcpStream, UdpSocket};
pub use std::path::{Path, PathBuf};
pub use std::sync::Arc;
pub use std::time::Duration;
