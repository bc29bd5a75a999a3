use priv_prelude::*;

/// Extension methods for `TcpBuilder`.
pub trait TcpBuilderExt {
    /// Bind reusably to the given address. Multiple sockets can be bound to the same local
    /// address using this method.
    ///
    /// The reuse options are applied between socket creation and bind; a failure to apply
    /// them aborts the call.
    fn bind_reusable(addr: &SocketAddr) -> Result<TcpBuilder, ReuseError>;
}

impl TcpBuilderExt for TcpBuilder {
    fn bind_reusable(addr: &SocketAddr) -> Result<TcpBuilder, ReuseError> {
        let socket = match addr.ip() {
            IpAddr::V4(..) => TcpBuilder::new_v4(),
            IpAddr::V6(..) => TcpBuilder::new_v6(),
        };
        let socket = socket.map_err(ReuseError::Create)?;
        sockopt::enable_reuse(&socket).map_err(ReuseError::SetSockOpt)?;
        let _ = socket.bind(addr).map_err(ReuseError::Create)?;
        Ok(socket)
    }
}
