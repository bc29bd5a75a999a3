use ip_addr::IpAddrExt;
use priv_prelude::*;

/// Some helpful additional methods for `SocketAddr`.
pub trait SocketAddrExt {
    /// If the IP address is an unspecified address (eg `0.0.0.0`), then it is expanded into
    /// a vector with a seperate IP address for each network interface.
    fn expand_local_unspecified(&self) -> io::Result<Vec<SocketAddr>>;

    /// If the IP address is the unspecified address then map it to the localhost address,
    /// keeping the port.
    fn unspecified_to_localhost(&self) -> SocketAddr;
}

impl SocketAddrExt for SocketAddr {
    fn expand_local_unspecified(&self) -> io::Result<Vec<SocketAddr>> {
        let port = self.port();
        let ret = self
            .ip()
            .expand_local_unspecified()?
            .into_iter()
            .map(|ip| SocketAddr::new(ip, port))
            .collect();
        Ok(ret)
    }

    fn unspecified_to_localhost(&self) -> SocketAddr {
        SocketAddr::new(self.ip().unspecified_to_localhost(), self.port())
    }
}
