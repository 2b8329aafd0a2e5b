use std::time::Duration;

/// Controls how [`SmtpProbe`](super::SmtpProbe) interrogates a mail exchanger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub port: u16,
    /// Identity announced in `HELO`. Defaults to the source address domain.
    pub helo_name: Option<String>,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            helo_name: None,
            connect_timeout: Duration::from_secs(5),
            command_timeout: Duration::from_secs(5),
        }
    }
}

impl ProbeOptions {
    /// Returns the `HELO` identity, falling back when none is configured.
    pub fn helo_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.helo_name
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(fallback)
    }
}
