use priv_prelude::*;
use std::net::ToSocketAddrs;
use std::str::FromStr;

/// A network family tag, naming the combination of address family and socket type a listen
/// or dial call operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetFamily {
    /// Raw IP, either address family.
    Ip,
    /// Raw IP over IPv4.
    Ip4,
    /// Raw IP over IPv6.
    Ip6,
    /// TCP, either address family.
    Tcp,
    /// TCP over IPv4.
    Tcp4,
    /// TCP over IPv6.
    Tcp6,
    /// UDP, either address family.
    Udp,
    /// UDP over IPv4.
    Udp4,
    /// UDP over IPv6.
    Udp6,
    /// Unix-domain stream socket.
    Unix,
    /// Unix-domain datagram socket.
    Unixgram,
    /// Unix-domain sequenced-packet socket.
    Unixpacket,
}

impl NetFamily {
    /// The tag string this family is written as.
    pub fn as_str(&self) -> &'static str {
        match *self {
            NetFamily::Ip => "ip",
            NetFamily::Ip4 => "ip4",
            NetFamily::Ip6 => "ip6",
            NetFamily::Tcp => "tcp",
            NetFamily::Tcp4 => "tcp4",
            NetFamily::Tcp6 => "tcp6",
            NetFamily::Udp => "udp",
            NetFamily::Udp4 => "udp4",
            NetFamily::Udp6 => "udp6",
            NetFamily::Unix => "unix",
            NetFamily::Unixgram => "unixgram",
            NetFamily::Unixpacket => "unixpacket",
        }
    }
}

impl fmt::Display for NetFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NetFamily {
    type Err = ReuseError;

    fn from_str(s: &str) -> Result<NetFamily, ReuseError> {
        let family = match s {
            "ip" => NetFamily::Ip,
            "ip4" => NetFamily::Ip4,
            "ip6" => NetFamily::Ip6,
            "tcp" => NetFamily::Tcp,
            "tcp4" => NetFamily::Tcp4,
            "tcp6" => NetFamily::Tcp6,
            "udp" => NetFamily::Udp,
            "udp4" => NetFamily::Udp4,
            "udp6" => NetFamily::Udp6,
            "unix" => NetFamily::Unix,
            "unixgram" => NetFamily::Unixgram,
            "unixpacket" => NetFamily::Unixpacket,
            _ => return Err(ReuseError::UnknownFamily(s.to_string())),
        };
        Ok(family)
    }
}

/// A resolved local endpoint, typed by family group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addr {
    /// An IP-only endpoint, for the raw IP families.
    Ip(IpAddr),
    /// A TCP endpoint.
    Tcp(SocketAddr),
    /// A UDP endpoint.
    Udp(SocketAddr),
    /// A filesystem-path endpoint, for the Unix-domain families. The empty path stands for
    /// an unnamed socket.
    Unix(PathBuf),
}

/// Resolves a textual address in `family`'s native syntax into a typed endpoint.
///
/// Host names are resolved through the system resolver and may block. The `*4`/`*6`
/// families only accept candidates of the matching address family. The empty string
/// resolves to the family's unspecified endpoint, so that a dial with no requested local
/// address binds ephemerally.
pub fn resolve_addr(family: NetFamily, address: &str) -> Result<Addr, ReuseError> {
    match family {
        NetFamily::Ip | NetFamily::Ip4 | NetFamily::Ip6 => {
            resolve_ip_addr(family, address).map(Addr::Ip)
        }
        NetFamily::Tcp | NetFamily::Tcp4 | NetFamily::Tcp6 => {
            resolve_socket_addr(family, address).map(Addr::Tcp)
        }
        NetFamily::Udp | NetFamily::Udp4 | NetFamily::Udp6 => {
            resolve_socket_addr(family, address).map(Addr::Udp)
        }
        NetFamily::Unix | NetFamily::Unixgram | NetFamily::Unixpacket => {
            Ok(Addr::Unix(resolve_path(address)))
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum IpVersion {
    Any,
    V4,
    V6,
}

impl IpVersion {
    fn matches(&self, ip: &IpAddr) -> bool {
        match *self {
            IpVersion::Any => true,
            IpVersion::V4 => ip.is_ipv4(),
            IpVersion::V6 => ip.is_ipv6(),
        }
    }

    fn unspecified(&self) -> IpAddr {
        match *self {
            IpVersion::Any | IpVersion::V4 => IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            IpVersion::V6 => IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)),
        }
    }
}

fn ip_version(family: NetFamily) -> IpVersion {
    match family {
        NetFamily::Ip4 | NetFamily::Tcp4 | NetFamily::Udp4 => IpVersion::V4,
        NetFamily::Ip6 | NetFamily::Tcp6 | NetFamily::Udp6 => IpVersion::V6,
        _ => IpVersion::Any,
    }
}

fn no_matching_addr(family: NetFamily, address: &str) -> ReuseError {
    ReuseError::AddrResolution(io::Error::new(
        io::ErrorKind::AddrNotAvailable,
        format!("no suitable {} address found for {:?}", family, address),
    ))
}

pub fn resolve_socket_addr(
    family: NetFamily,
    address: &str,
) -> Result<SocketAddr, ReuseError> {
    let version = ip_version(family);
    if address.is_empty() {
        return Ok(SocketAddr::new(version.unspecified(), 0));
    }
    let mut candidates = address.to_socket_addrs().map_err(ReuseError::AddrResolution)?;
    candidates
        .find(|candidate| version.matches(&candidate.ip()))
        .ok_or_else(|| no_matching_addr(family, address))
}

pub fn resolve_ip_addr(family: NetFamily, address: &str) -> Result<IpAddr, ReuseError> {
    let version = ip_version(family);
    if address.is_empty() {
        return Ok(version.unspecified());
    }
    if let Ok(ip) = IpAddr::from_str(address) {
        if version.matches(&ip) {
            return Ok(ip);
        }
        return Err(no_matching_addr(family, address));
    }
    // A host name. Resolve it with a placeholder port and discard the port again.
    let candidates = (address, 0u16)
        .to_socket_addrs()
        .map_err(ReuseError::AddrResolution)?;
    candidates
        .map(|candidate| candidate.ip())
        .find(|ip| version.matches(ip))
        .ok_or_else(|| no_matching_addr(family, address))
}

pub fn resolve_path(address: &str) -> PathBuf {
    PathBuf::from(address)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_family_tag_parses_back_to_itself() {
        let families = [
            NetFamily::Ip,
            NetFamily::Ip4,
            NetFamily::Ip6,
            NetFamily::Tcp,
            NetFamily::Tcp4,
            NetFamily::Tcp6,
            NetFamily::Udp,
            NetFamily::Udp4,
            NetFamily::Udp6,
            NetFamily::Unix,
            NetFamily::Unixgram,
            NetFamily::Unixpacket,
        ];
        for family in &families {
            assert_eq!(unwrap!(NetFamily::from_str(family.as_str())), *family);
        }
    }

    #[test]
    fn unknown_family_tags_are_rejected() {
        for tag in &["sctp", "TCP", "tcp ", "", "tcp7"] {
            match NetFamily::from_str(tag) {
                Err(ReuseError::UnknownFamily(ref family)) => assert_eq!(family, tag),
                res => panic!("unexpected result for {:?}: {:?}", tag, res),
            }
        }
    }

    #[test]
    fn empty_address_resolves_to_the_unspecified_endpoint() {
        match unwrap!(resolve_addr(NetFamily::Tcp, "")) {
            Addr::Tcp(addr) => {
                assert!(addr.ip().is_unspecified());
                assert_eq!(addr.port(), 0);
            }
            addr => panic!("unexpected addr: {:?}", addr),
        }
        match unwrap!(resolve_addr(NetFamily::Udp6, "")) {
            Addr::Udp(addr) => {
                assert!(addr.is_ipv6());
                assert!(addr.ip().is_unspecified());
            }
            addr => panic!("unexpected addr: {:?}", addr),
        }
        match unwrap!(resolve_addr(NetFamily::Ip, "")) {
            Addr::Ip(ip) => assert!(ip.is_unspecified()),
            addr => panic!("unexpected addr: {:?}", addr),
        }
        match unwrap!(resolve_addr(NetFamily::Unix, "")) {
            Addr::Unix(path) => assert_eq!(path, PathBuf::new()),
            addr => panic!("unexpected addr: {:?}", addr),
        }
    }

    #[test]
    fn resolved_addr_variant_matches_the_family() {
        match unwrap!(resolve_addr(NetFamily::Tcp, "127.0.0.1:1234")) {
            Addr::Tcp(addr) => assert_eq!(addr, unwrap!("127.0.0.1:1234".parse())),
            addr => panic!("unexpected addr: {:?}", addr),
        }
        match unwrap!(resolve_addr(NetFamily::Udp, "[::1]:80")) {
            Addr::Udp(addr) => assert_eq!(addr, unwrap!("[::1]:80".parse())),
            addr => panic!("unexpected addr: {:?}", addr),
        }
        match unwrap!(resolve_addr(NetFamily::Ip4, "192.168.1.1")) {
            Addr::Ip(ip) => assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))),
            addr => panic!("unexpected addr: {:?}", addr),
        }
        match unwrap!(resolve_addr(NetFamily::Unixgram, "/tmp/some.sock")) {
            Addr::Unix(path) => assert_eq!(path, PathBuf::from("/tmp/some.sock")),
            addr => panic!("unexpected addr: {:?}", addr),
        }
    }

    #[test]
    fn version_qualified_families_filter_candidates() {
        match resolve_addr(NetFamily::Tcp6, "127.0.0.1:1234") {
            Err(ReuseError::AddrResolution(..)) => (),
            res => panic!("unexpected result: {:?}", res),
        }
        match resolve_addr(NetFamily::Tcp4, "[::1]:1234") {
            Err(ReuseError::AddrResolution(..)) => (),
            res => panic!("unexpected result: {:?}", res),
        }
        match resolve_addr(NetFamily::Ip4, "::1") {
            Err(ReuseError::AddrResolution(..)) => (),
            res => panic!("unexpected result: {:?}", res),
        }
        match unwrap!(resolve_addr(NetFamily::Ip6, "::1")) {
            Addr::Ip(ip) => assert_eq!(ip, IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))),
            addr => panic!("unexpected addr: {:?}", addr),
        }
    }

    #[test]
    fn malformed_addresses_fail_resolution() {
        match resolve_addr(NetFamily::Tcp, "127.0.0.1") {
            Err(ReuseError::AddrResolution(..)) => (),
            res => panic!("unexpected result: {:?}", res),
        }
        match resolve_addr(NetFamily::Udp, "not an address at all:99999") {
            Err(ReuseError::AddrResolution(..)) => (),
            res => panic!("unexpected result: {:?}", res),
        }
    }
}
