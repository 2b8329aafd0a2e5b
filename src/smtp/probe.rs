use std::io::{Read, Write};

use tracing::debug;

use crate::address::Address;
use crate::alias;
use crate::mx::MxRecord;
use crate::net::{Dialer, DirectDialer};

use super::error::ProbeError;
use super::options::ProbeOptions;
use super::session::SmtpSession;
use super::types::ProbeResult;

/// Judges deliverability of an address against one mail exchanger.
///
/// Object-safe seam so the verifier can be exercised without a network; the
/// production implementation is [`SmtpProbe`].
pub trait MailboxProbe {
    fn probe(&self, record: &MxRecord, address: &Address) -> ProbeResult;
}

/// Runs the minimal `HELO` / `MAIL FROM` / `RCPT TO` dialogue needed to judge
/// deliverability, without sending a message body.
///
/// When the target is accepted, a second `RCPT TO` for a freshly generated
/// random alias on the same domain decides between a real mailbox and a
/// catch-all configuration, reusing the open session.
pub struct SmtpProbe<D = DirectDialer> {
    source_addr: String,
    dialer: D,
    options: ProbeOptions,
}

impl SmtpProbe<DirectDialer> {
    pub fn new(source_addr: impl Into<String>) -> Self {
        Self::with_dialer(source_addr, DirectDialer)
    }
}

impl<D: Dialer> SmtpProbe<D> {
    pub fn with_dialer(source_addr: impl Into<String>, dialer: D) -> Self {
        Self {
            source_addr: source_addr.into(),
            dialer,
            options: ProbeOptions::default(),
        }
    }

    pub fn options(mut self, options: ProbeOptions) -> Self {
        self.options = options;
        self
    }

    fn helo_fallback(&self) -> &str {
        self.source_addr
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or("localhost")
    }

    fn run(&self, record: &MxRecord, address: &Address) -> Result<(bool, bool), ProbeError> {
        let stream = self
            .dialer
            .dial(&record.exchange, self.options.port, self.options.connect_timeout)?;
        stream
            .set_read_timeout(Some(self.options.command_timeout))
            .map_err(ProbeError::io)?;
        stream
            .set_write_timeout(Some(self.options.command_timeout))
            .map_err(ProbeError::io)?;

        let mut session = SmtpSession::new(stream);
        let verdict = self.dialogue(&mut session, address);
        session.quit();
        verdict
    }

    fn dialogue<T: Read + Write>(
        &self,
        session: &mut SmtpSession<T>,
        address: &Address,
    ) -> Result<(bool, bool), ProbeError> {
        let greeting = session.read_reply()?;
        if !greeting.is_positive_completion() {
            return Err(ProbeError::Greeting(greeting.code));
        }

        let helo = session.command(&format!("HELO {}", self.options.helo_name(self.helo_fallback())))?;
        let mail = session.command(&format!("MAIL FROM:<{}>", self.source_addr))?;
        if !helo.is_positive_completion() || !mail.is_positive_completion() {
            debug!(
                helo = helo.code,
                mail = mail.code,
                "envelope refused before RCPT"
            );
            return Ok((false, false));
        }

        let target = session.command(&format!("RCPT TO:<{}>", address.addr()))?;
        if !target.is_positive_completion() {
            debug!(code = target.code, addr = %address, "target address rejected");
            return Ok((false, false));
        }

        // Target accepted. A random alias accepted on the same session means
        // the domain takes anything, so a mailbox cannot be confirmed.
        let control = session.command(&format!(
            "RCPT TO:<{}>",
            alias::random_email(&address.domain)
        ))?;
        if control.is_positive_completion() {
            debug!(domain = %address.domain, "catch-all domain detected");
            Ok((false, true))
        } else {
            Ok((true, false))
        }
    }
}

impl<D: Dialer> MailboxProbe for SmtpProbe<D> {
    fn probe(&self, record: &MxRecord, address: &Address) -> ProbeResult {
        match self.run(record, address) {
            Ok((deliverable, catch_all)) => ProbeResult {
                host_exists: true,
                deliverable,
                catch_all,
            },
            Err(err) => {
                debug!(exchange = %record.exchange, error = %err, "mail exchanger unreachable");
                ProbeResult::unreachable()
            }
        }
    }
}
