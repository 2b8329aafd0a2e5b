#![forbid(unsafe_code)]
//! mailprobe_lib — sondage SMTP de délivrabilité (MVP)
//!
//! Determines whether an address is likely to accept mail without sending a
//! message: parse, resolve MX, probe the exchangers with a partial SMTP
//! transaction, detect catch-all domains.

pub mod address;
pub mod alias;
pub mod mx;
pub mod net;
pub mod smtp;
pub mod verifier;

pub use address::{Address, EmailFormatError, parse as parse_address};
pub use alias::random_email;
pub use mx::{Error as MxError, MxRecord, MxResolver, SystemResolver};
pub use net::{DialError, Dialer, DirectDialer, SocksDialer, SocksProxy};
pub use smtp::{MailboxProbe, ProbeOptions, ProbeResult, SmtpProbe, SmtpReply};
pub use verifier::{VerificationOutcome, Verifier};
