extern crate env_logger;
extern crate reuseport;
extern crate rustls;
extern crate rustls_pemfile;
#[macro_use]
extern crate unwrap;

use reuseport::{dial_tls, listen_tls, Addr, NetFamily};
use rustls::{Certificate, ClientConfig, PrivateKey, RootCertStore, ServerConfig, ServerName};
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::sync::Arc;
use std::thread;

fn load_certs() -> Vec<Certificate> {
    let file = unwrap!(File::open("tests/certs/cert.pem"));
    let mut reader = BufReader::new(file);
    unwrap!(rustls_pemfile::certs(&mut reader))
        .into_iter()
        .map(Certificate)
        .collect()
}

fn load_key() -> PrivateKey {
    let file = unwrap!(File::open("tests/certs/key.pem"));
    let mut reader = BufReader::new(file);
    let mut keys = unwrap!(rustls_pemfile::pkcs8_private_keys(&mut reader));
    assert!(!keys.is_empty(), "no private key in fixture");
    PrivateKey(keys.remove(0))
}

fn server_config() -> Arc<ServerConfig> {
    Arc::new(unwrap!(ServerConfig::builder()
        .with_safe_defaults()
        .with_no_client_auth()
        .with_single_cert(load_certs(), load_key())))
}

fn client_config() -> Arc<ClientConfig> {
    let mut roots = RootCertStore::empty();
    for cert in load_certs() {
        unwrap!(roots.add(&cert));
    }
    Arc::new(
        ClientConfig::builder()
            .with_safe_defaults()
            .with_root_certificates(roots)
            .with_no_client_auth(),
    )
}

#[test]
fn tls_listen_and_dial_exchange_bytes() {
    let _ = env_logger::try_init();

    let listener = unwrap!(listen_tls(NetFamily::Tcp, "127.0.0.1:0", server_config()));
    let addr = match unwrap!(listener.local_addr()) {
        Addr::Tcp(addr) => addr,
        addr => panic!("unexpected addr: {:?}", addr),
    };

    let server = thread::spawn(move || {
        let mut stream = unwrap!(listener.accept());
        let mut buf = [0u8; 5];
        unwrap!(stream.read_exact(&mut buf));
        assert_eq!(&buf, b"hello");
        unwrap!(stream.write_all(b"world"));
    });

    let name = unwrap!(ServerName::try_from("localhost"));
    let mut stream = unwrap!(dial_tls(
        NetFamily::Tcp,
        "",
        &addr.to_string(),
        client_config(),
        name,
    ));
    unwrap!(stream.write_all(b"hello"));
    let mut buf = [0u8; 5];
    unwrap!(stream.read_exact(&mut buf));
    assert_eq!(&buf, b"world");

    unwrap!(server.join());
}

#[test]
fn tls_listeners_share_a_port_where_reuse_is_enabled() {
    let _ = env_logger::try_init();

    let l0 = unwrap!(listen_tls(NetFamily::Tcp, "127.0.0.1:0", server_config()));
    let addr = match unwrap!(l0.local_addr()) {
        Addr::Tcp(addr) => addr,
        addr => panic!("unexpected addr: {:?}", addr),
    };

    if reuseport::ENABLED {
        let _l1 = unwrap!(listen_tls(NetFamily::Tcp, &addr.to_string(), server_config()));
    }
}
