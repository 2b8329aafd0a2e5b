//! SMTP deliverability probing.
//!
//! [`SmtpProbe`] runs a partial SMTP transaction against a single mail
//! exchanger and classifies the observed behaviour into a [`ProbeResult`];
//! the [`MailboxProbe`] trait is the seam the verifier depends on.

mod error;
mod options;
mod probe;
mod session;
mod types;

pub use error::ProbeError;
pub use options::ProbeOptions;
pub use probe::{MailboxProbe, SmtpProbe};
pub use session::SmtpSession;
pub use types::{ProbeResult, SmtpReply};
