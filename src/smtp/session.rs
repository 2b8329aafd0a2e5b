use std::io::{self, Read, Write};

use tracing::trace;

use super::error::ProbeError;
use super::types::SmtpReply;

/// A command/reply SMTP dialogue over any byte stream.
///
/// Generic over the transport so tests can drive it with an in-memory stream
/// while production code hands it the [`TcpStream`](std::net::TcpStream) a
/// [`Dialer`](crate::net::Dialer) produced. Read deadlines belong to the
/// transport itself.
pub struct SmtpSession<T> {
    transport: T,
    buffer: Vec<u8>,
}

impl<T: Read + Write> SmtpSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            buffer: Vec::new(),
        }
    }

    /// Sends `command` (CRLF appended) and reads the reply.
    pub fn command(&mut self, command: &str) -> Result<SmtpReply, ProbeError> {
        trace!(command, "C");
        self.write_line(command)?;
        let reply = self.read_reply()?;
        trace!(code = reply.code, message = %reply.message, "S");
        Ok(reply)
    }

    /// Reads one (possibly multiline) reply, e.g. the connection greeting.
    pub fn read_reply(&mut self) -> Result<SmtpReply, ProbeError> {
        let mut code: Option<u16> = None;
        let mut message_lines = Vec::new();
        loop {
            let line = self.read_line()?;
            if line.len() < 3 {
                return Err(ProbeError::Protocol(format!("invalid reply: '{line}'")));
            }
            let parsed_code = line[..3]
                .parse::<u16>()
                .map_err(|_| ProbeError::Protocol(format!("invalid status code: '{line}'")))?;
            if let Some(existing) = code {
                if existing != parsed_code {
                    return Err(ProbeError::Protocol(format!(
                        "inconsistent reply codes: {existing} vs {parsed_code}"
                    )));
                }
            } else {
                code = Some(parsed_code);
            }
            let continuation = line.as_bytes().get(3).copied() == Some(b'-');
            let text = if line.len() > 4 {
                line[4..].to_string()
            } else {
                String::new()
            };
            message_lines.push(text);
            if !continuation {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.unwrap_or(0),
            message: message_lines.join("\n"),
        })
    }

    /// Consumes the session, returning the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Best-effort session teardown. A peer that already hung up is fine.
    pub fn quit(&mut self) {
        if self.write_line("QUIT").is_ok() {
            let _ = self.read_reply();
        }
    }

    fn write_line(&mut self, line: &str) -> Result<(), ProbeError> {
        let mut data = line.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        self.transport.write_all(&data).map_err(ProbeError::io)?;
        self.transport.flush().map_err(ProbeError::io)
    }

    fn read_line(&mut self) -> Result<String, ProbeError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|byte| *byte == b'\n') {
                let mut line = self.buffer.drain(..=pos).collect::<Vec<_>>();
                if line.ends_with(b"\r\n") {
                    line.truncate(line.len() - 2);
                } else if line.ends_with(b"\n") {
                    line.truncate(line.len() - 1);
                }
                return String::from_utf8(line)
                    .map_err(|err| ProbeError::Protocol(format!("utf8 error: {err}")));
            }

            let mut buf = [0u8; 512];
            let read = self.transport.read(&mut buf).map_err(ProbeError::io)?;
            if read == 0 {
                return Err(ProbeError::io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed while reading reply",
                )));
            }
            self.buffer.extend_from_slice(&buf[..read]);
        }
    }
}
