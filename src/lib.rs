//! Listen and dial from reusable local socket addresses.
//!
//! Every socket created by this crate has `SO_REUSEADDR` set, and `SO_REUSEPORT` too on
//! platforms which honour it, applied after the socket is created and before it is bound or
//! connected. This allows multiple sockets to listen on the same address and port
//! simultaneously, and allows outgoing connections to originate from a port another socket
//! is already bound to. You should only use this crate if you know what `SO_REUSEADDR` and
//! `SO_REUSEPORT` are.
//!
//! ```no_run
//! use reuseport::{TcpListenerExt, TcpStreamExt};
//! use std::net::{TcpListener, TcpStream};
//!
//! // listen on the same port.
//! let addr = "127.0.0.1:1234".parse().unwrap();
//! let l0 = TcpListener::listen_reusable(&addr).unwrap();
//! let l1 = TcpListener::listen_reusable(&addr).unwrap();
//!
//! // dial from the port a listener is bound to.
//! let stream = TcpStream::connect_reusable(&addr, &"127.0.0.1:1235".parse().unwrap());
//! ```
//!
//! Note: a socket cannot dial its own address. TCP/IP stacks identify connections by the
//! (local address, local port, remote address, remote port) four-tuple, and such a
//! connection would clash with itself.

extern crate get_if_addrs;
#[macro_use]
extern crate log;
extern crate net2;
#[macro_use]
extern crate quick_error;
extern crate rustls;
extern crate socket2;

#[cfg(unix)]
extern crate libc;
#[cfg(windows)]
extern crate windows_sys;

#[cfg(test)]
#[macro_use]
extern crate unwrap;

mod priv_prelude;
mod prelude;

mod addr;
mod error;
mod ip;
mod ip_addr;
mod net;
mod socket_addr;
mod sockopt;
mod tcp;
mod tls;
mod udp;
#[cfg(unix)]
mod unix;

pub use prelude::*;
