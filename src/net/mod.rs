//! Transport dialing.
//!
//! [`Dialer`] abstracts how a TCP connection to a mail exchanger (or any other
//! protocol peer) is established, so the SMTP client stays independent of the
//! direct-vs-proxied decision. [`DirectDialer`] connects straight to the
//! target; [`SocksDialer`] tunnels through a SOCKS5 proxy.

mod direct;
mod proxy;

pub use direct::DirectDialer;
pub use proxy::{SocksDialer, SocksProxy};

use std::net::TcpStream;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialError {
    #[error("no socket address resolved for {host}")]
    NoAddress { host: String },
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("proxy connection via {proxy} failed: {source}")]
    Proxy {
        proxy: String,
        #[source]
        source: std::io::Error,
    },
}

/// Establishes a connected byte stream to `host:port` within `timeout`.
///
/// Not SMTP-specific: any protocol client needing an optionally proxied
/// transport can take a `Dialer`.
pub trait Dialer: Send + Sync {
    fn dial(&self, host: &str, port: u16, timeout: Duration) -> Result<TcpStream, DialError>;
}
