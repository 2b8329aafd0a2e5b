//! DNS MX resolution.
//!
//! [`SystemResolver`] performs a synchronous lookup using the system resolver;
//! the [`MxResolver`] trait is the seam the verifier depends on.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{MxResolver, SystemResolver};
pub use types::MxRecord;

#[cfg(test)]
pub(crate) mod tests;
