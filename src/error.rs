use rustls;
use std::io;

quick_error! {
    /// Errors returned by the reusable listen and dial entry points.
    #[derive(Debug)]
    pub enum ReuseError {
        /// The network family tag names no known resolution or creation strategy.
        UnknownFamily(family: String) {
            description("unknown network family")
            display("unknown network family {:?}", family)
        }
        /// The textual address could not be parsed or resolved.
        AddrResolution(e: io::Error) {
            description("error resolving address")
            display("error resolving address: {}", e)
            cause(e)
        }
        /// Applying the reuse options to the raw socket failed. The socket is not returned.
        SetSockOpt(e: io::Error) {
            description("error setting reuse socket options")
            display("error setting reuse socket options: {}", e)
            cause(e)
        }
        /// The underlying socket create, bind, listen or connect call failed.
        Create(e: io::Error) {
            description("error creating socket")
            display("error creating socket: {}", e)
            cause(e)
        }
        /// The TLS session could not be created.
        Tls(e: rustls::Error) {
            description("tls error")
            display("tls error: {}", e)
            cause(e)
        }
        /// The TLS handshake failed.
        Handshake(e: io::Error) {
            description("tls handshake failed")
            display("tls handshake failed: {}", e)
            cause(e)
        }
    }
}
