use tracing::debug;
use trust_dns_resolver::Resolver;
use trust_dns_resolver::error::ResolveErrorKind;

use super::{Error, MxRecord};

/// Provides the ordered set of mail-exchanger candidates for a domain.
///
/// The verifier consumes this seam only; tests inject stubs, production code
/// uses [`SystemResolver`]. Returned records need not be sorted — the caller
/// orders them by preference.
pub trait MxResolver {
    fn resolve(&self, domain: &str) -> Result<Vec<MxRecord>, Error>;
}

/// MX lookup through the system resolver configuration.
///
/// The domain is normalized via IDNA before querying DNS. A domain that
/// exists but carries no MX records yields an empty list, not an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl MxResolver for SystemResolver {
    fn resolve(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        let ascii = normalize_domain(domain)?;
        let resolver = Resolver::from_system_conf().map_err(Error::resolver_init)?;
        let lookup = match resolver.mx_lookup(&ascii) {
            Ok(lookup) => lookup,
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => {
                    debug!(domain = %ascii, "no MX records found");
                    return Ok(Vec::new());
                }
                _ => return Err(Error::lookup(err)),
            },
        };

        Ok(lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(mx.exchange().to_utf8())))
            .collect())
    }
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(Error::idna)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}
