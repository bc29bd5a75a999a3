//! Reusable Unix-domain sockets.
//!
//! The reuse options are applied to these sockets the same way as to every other family,
//! for uniformity; path-bound sockets get no same-port semantics from the kernel, so a
//! stale socket file still has to be removed before a path can be bound again.

use priv_prelude::*;
use socket2::{Domain, SockAddr, Socket, Type};
use std::os::unix::net::{UnixDatagram, UnixListener, UnixStream};

fn new_reusable(kind: Type) -> Result<Socket, ReuseError> {
    let socket = Socket::new(Domain::UNIX, kind, None).map_err(ReuseError::Create)?;
    sockopt::enable_reuse(&socket).map_err(ReuseError::SetSockOpt)?;
    Ok(socket)
}

fn bind(socket: &Socket, path: &Path) -> Result<(), ReuseError> {
    let addr = SockAddr::unix(path).map_err(ReuseError::Create)?;
    socket.bind(&addr).map_err(ReuseError::Create)
}

fn connect(socket: &Socket, path: &Path) -> Result<(), ReuseError> {
    let addr = SockAddr::unix(path).map_err(ReuseError::Create)?;
    socket.connect(&addr).map_err(ReuseError::Create)
}

/// Extension methods for `UnixListener`.
pub trait UnixListenerExt {
    /// Listen reusably on the given path.
    fn listen_reusable(path: &Path) -> Result<UnixListener, ReuseError>;
}

impl UnixListenerExt for UnixListener {
    fn listen_reusable(path: &Path) -> Result<UnixListener, ReuseError> {
        let socket = new_reusable(Type::STREAM)?;
        bind(&socket, path)?;
        socket.listen(1024).map_err(ReuseError::Create)?;
        trace!("listening reusably on {:?}", path);
        Ok(socket.into())
    }
}

/// Extension methods for `UnixStream`.
pub trait UnixStreamExt {
    /// Connect to the socket at `raddr`. With `laddr` given, the connecting socket is first
    /// bound to that path; otherwise it stays unnamed.
    fn connect_reusable(laddr: Option<&Path>, raddr: &Path)
        -> Result<UnixStream, ReuseError>;

    /// The same as `connect_reusable`, except the connect attempt is abandoned with an
    /// error once `timeout` has elapsed.
    fn connect_reusable_timeout(
        laddr: Option<&Path>,
        raddr: &Path,
        timeout: Duration,
    ) -> Result<UnixStream, ReuseError>;
}

impl UnixStreamExt for UnixStream {
    fn connect_reusable(laddr: Option<&Path>, raddr: &Path)
        -> Result<UnixStream, ReuseError>
    {
        let socket = new_reusable(Type::STREAM)?;
        if let Some(laddr) = laddr {
            bind(&socket, laddr)?;
        }
        connect(&socket, raddr)?;
        Ok(socket.into())
    }

    fn connect_reusable_timeout(
        laddr: Option<&Path>,
        raddr: &Path,
        timeout: Duration,
    ) -> Result<UnixStream, ReuseError> {
        let socket = new_reusable(Type::STREAM)?;
        if let Some(laddr) = laddr {
            bind(&socket, laddr)?;
        }
        let addr = SockAddr::unix(raddr).map_err(ReuseError::Create)?;
        socket
            .connect_timeout(&addr, timeout)
            .map_err(ReuseError::Create)?;
        socket.set_nonblocking(false).map_err(ReuseError::Create)?;
        Ok(socket.into())
    }
}

/// Extension methods for `UnixDatagram`.
pub trait UnixDatagramExt {
    /// Bind reusably to the given path.
    fn bind_reusable(path: &Path) -> Result<UnixDatagram, ReuseError>;

    /// Connect to the datagram socket at `raddr`, so that `send`/`recv` exchange datagrams
    /// with that peer only. With `laddr` given, the socket is first bound to that path.
    fn connect_reusable(laddr: Option<&Path>, raddr: &Path)
        -> Result<UnixDatagram, ReuseError>;
}

impl UnixDatagramExt for UnixDatagram {
    fn bind_reusable(path: &Path) -> Result<UnixDatagram, ReuseError> {
        let socket = new_reusable(Type::DGRAM)?;
        bind(&socket, path)?;
        trace!("bound reusably to {:?}", path);
        Ok(socket.into())
    }

    fn connect_reusable(laddr: Option<&Path>, raddr: &Path)
        -> Result<UnixDatagram, ReuseError>
    {
        let socket = new_reusable(Type::DGRAM)?;
        if let Some(laddr) = laddr {
            bind(&socket, laddr)?;
        }
        connect(&socket, raddr)?;
        Ok(socket.into())
    }
}
