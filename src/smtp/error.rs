use thiserror::Error;

use crate::net::DialError;

/// Internal failure of a probe session. Never escapes [`probe`]: the caller
/// sees `host_exists = false` instead, so the orchestrator can fall through
/// to the next exchanger.
///
/// [`probe`]: crate::smtp::MailboxProbe::probe
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Dial(#[from] DialError),
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("malformed reply: {0}")]
    Protocol(String),
    #[error("greeting refused with code {0}")]
    Greeting(u16),
}

impl ProbeError {
    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
