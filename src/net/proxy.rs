use std::net::TcpStream;
use std::time::Duration;

use socks::Socks5Stream;
use tracing::trace;

use super::{DialError, Dialer};

/// SOCKS5 proxy endpoint, with optional username/password authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocksProxy {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SocksProxy {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    pub fn with_auth(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    fn endpoint(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

/// Tunnels the connection through a SOCKS5 proxy. The proxy performs the
/// target resolution, so no DNS for the exchanger leaks from this host.
#[derive(Debug, Clone)]
pub struct SocksDialer {
    proxy: SocksProxy,
}

impl SocksDialer {
    pub fn new(proxy: SocksProxy) -> Self {
        Self { proxy }
    }
}

impl Dialer for SocksDialer {
    // The SOCKS handshake uses the OS connect deadline; `timeout` is applied
    // to the tunneled stream by the caller via read/write timeouts.
    fn dial(&self, host: &str, port: u16, _timeout: Duration) -> Result<TcpStream, DialError> {
        trace!(proxy = %self.proxy.host, target = host, "dialing via SOCKS5");
        let target = (host, port);
        let result = match (&self.proxy.username, &self.proxy.password) {
            (Some(username), Some(password)) => {
                Socks5Stream::connect_with_password(self.proxy.endpoint(), target, username, password)
            }
            _ => Socks5Stream::connect(self.proxy.endpoint(), target),
        };
        let stream = result.map_err(|source| DialError::Proxy {
            proxy: format!("{}:{}", self.proxy.host, self.proxy.port),
            source,
        })?;
        Ok(stream.into_inner())
    }
}
