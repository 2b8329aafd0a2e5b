use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::trace;

use super::{DialError, Dialer};

/// Plain TCP connection, trying each resolved socket address in turn.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectDialer;

impl Dialer for DirectDialer {
    fn dial(&self, host: &str, port: u16, timeout: Duration) -> Result<TcpStream, DialError> {
        let addrs = format!("{host}:{port}")
            .to_socket_addrs()
            .map_err(|source| DialError::Connect {
                host: host.to_string(),
                source,
            })?;

        let mut last_err = None;
        for addr in addrs {
            trace!(%addr, "dialing");
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => return Ok(stream),
                Err(source) => {
                    last_err = Some(DialError::Connect {
                        host: host.to_string(),
                        source,
                    });
                }
            }
        }
        Err(last_err.unwrap_or(DialError::NoAddress {
            host: host.to_string(),
        }))
    }
}
