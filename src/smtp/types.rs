/// A raw SMTP reply, preserving the numeric status code and message text.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub message: String,
}

impl SmtpReply {
    /// The closed accept/reject classification: `2xx` accepts, everything
    /// else rejects.
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }
}

/// Outcome of one SMTP probe against a single mail exchanger.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    /// The transport connected and the server spoke SMTP through HELO/MAIL.
    pub host_exists: bool,
    /// The target address was accepted while the random control probe was not.
    pub deliverable: bool,
    /// The server accepted the random control probe too, so per-address
    /// existence is unverifiable.
    pub catch_all: bool,
}

impl ProbeResult {
    pub(crate) fn unreachable() -> Self {
        Self {
            host_exists: false,
            deliverable: false,
            catch_all: false,
        }
    }
}
