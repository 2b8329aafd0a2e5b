use std::fmt;

use thiserror::Error;

/// Failure modes of [`parse`]. The message text is part of the public
/// contract and embeds the original raw input verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailFormatError {
    #[error("email does not contain address: {0}")]
    MissingAddress(String),
    #[error("address provided is invalid: {0}")]
    InvalidAddress(String),
}

/// A parsed mail address. Only [`parse`] constructs one, so every
/// `Address` carries a non-empty local part and domain.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Optional display name (`"USER"` in `USER <user@domain>`), empty when absent.
    pub name: String,
    /// Local part, left of the last `@`.
    pub username: String,
    /// Domain, right of the last `@`.
    pub domain: String,
}

impl Address {
    /// Canonical `username@domain` form used in protocol commands.
    pub fn addr(&self) -> String {
        format!("{}@{}", self.username, self.domain)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.domain)
    }
}

/// Parses a header-style address string: either a bare `local@domain` or the
/// bracketed `Name <local@domain>` form. The local part and domain are split
/// on the last `@`.
pub fn parse(raw: &str) -> Result<Address, EmailFormatError> {
    let (name, candidate) = split_display_name(raw);
    if candidate.is_empty() {
        return Err(EmailFormatError::MissingAddress(raw.to_string()));
    }

    let Some((username, domain)) = candidate.rsplit_once('@') else {
        return Err(EmailFormatError::InvalidAddress(raw.to_string()));
    };
    if username.is_empty() || domain.is_empty() {
        return Err(EmailFormatError::InvalidAddress(raw.to_string()));
    }

    Ok(Address {
        name: name.to_string(),
        username: username.to_string(),
        domain: domain.to_string(),
    })
}

fn split_display_name(raw: &str) -> (&str, &str) {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_suffix('>') {
        if let Some((name, inner)) = rest.split_once('<') {
            return (name.trim(), inner.trim());
        }
    }
    ("", trimmed)
}
