//! Orchestration: parse, resolve, probe exchangers in preference order.

mod types;

pub use types::VerificationOutcome;

use tracing::{debug, warn};

use crate::address::{self, EmailFormatError};
use crate::mx::{MxResolver, SystemResolver};
use crate::net::{SocksDialer, SocksProxy};
use crate::smtp::{MailboxProbe, ProbeOptions, SmtpProbe};

/// Verifies deliverability of addresses without sending mail.
///
/// Construction fixes the envelope-sender identity (`source_addr`) used in
/// every `MAIL FROM` the verifier issues. The verifier holds no mutable
/// state, so one instance serves concurrent callers.
pub struct Verifier<R = SystemResolver, P = SmtpProbe> {
    resolver: R,
    probe: P,
}

impl Verifier {
    /// System DNS resolver, direct TCP, default probing options.
    pub fn new(source_addr: impl Into<String>) -> Self {
        Self {
            resolver: SystemResolver,
            probe: SmtpProbe::new(source_addr),
        }
    }

    /// Like [`Verifier::new`], with explicit probing options.
    pub fn with_options(source_addr: impl Into<String>, options: ProbeOptions) -> Self {
        Self {
            resolver: SystemResolver,
            probe: SmtpProbe::new(source_addr).options(options),
        }
    }

    /// Routes every probe through a SOCKS5 proxy.
    pub fn via_proxy(
        source_addr: impl Into<String>,
        proxy: SocksProxy,
        options: ProbeOptions,
    ) -> Verifier<SystemResolver, SmtpProbe<SocksDialer>> {
        Verifier {
            resolver: SystemResolver,
            probe: SmtpProbe::with_dialer(source_addr, SocksDialer::new(proxy)).options(options),
        }
    }
}

impl<R: MxResolver, P: MailboxProbe> Verifier<R, P> {
    /// Assembles a verifier from explicit collaborators.
    pub fn with_parts(resolver: R, probe: P) -> Self {
        Self { resolver, probe }
    }

    /// Parses `raw_address` and probes the domain's mail exchangers in
    /// ascending preference order. The first exchanger that answers decides:
    /// reachability, not deliverability, triggers failover to the next host.
    ///
    /// Malformed input is the only error; resolution and transport failures
    /// fold into the outcome (`mx_reachable = false`).
    pub fn verify(&self, raw_address: &str) -> Result<VerificationOutcome, EmailFormatError> {
        let address = address::parse(raw_address)?;

        let mut records = match self.resolver.resolve(&address.domain) {
            Ok(records) => records,
            Err(err) => {
                warn!(domain = %address.domain, error = %err, "MX resolution failed");
                return Ok(VerificationOutcome::unreachable(address));
            }
        };
        // Stable: ties keep resolver-provided order.
        records.sort_by_key(|record| record.preference);

        for record in &records {
            debug!(record = %record, "probing mail exchanger");
            let result = self.probe.probe(record, &address);
            if result.host_exists {
                return Ok(VerificationOutcome {
                    address,
                    deliverable: result.deliverable,
                    catch_all: result.catch_all,
                    mx_reachable: true,
                });
            }
        }

        debug!(domain = %address.domain, "no mail exchanger reachable");
        Ok(VerificationOutcome::unreachable(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mx::MxRecord;
    use crate::mx::tests::StubResolver;
    use crate::smtp::ProbeResult;
    use std::cell::RefCell;

    struct StubProbe<F> {
        calls: RefCell<Vec<String>>,
        on_probe: F,
    }

    impl<F> StubProbe<F>
    where
        F: Fn(&MxRecord) -> ProbeResult,
    {
        fn new(on_probe: F) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                on_probe,
            }
        }
    }

    impl<F> MailboxProbe for StubProbe<F>
    where
        F: Fn(&MxRecord) -> ProbeResult,
    {
        fn probe(&self, record: &MxRecord, _address: &crate::address::Address) -> ProbeResult {
            self.calls.borrow_mut().push(record.to_string());
            (self.on_probe)(record)
        }
    }

    fn two_records() -> StubResolver {
        StubResolver::new(|domain| {
            assert_eq!(domain, "example.com");
            Ok(vec![
                MxRecord::new(10, "smtp.example.com"),
                MxRecord::new(21, "smtp.example.l.com"),
            ])
        })
    }

    fn answered(deliverable: bool, catch_all: bool) -> ProbeResult {
        ProbeResult {
            host_exists: true,
            deliverable,
            catch_all,
        }
    }

    fn unreachable() -> ProbeResult {
        ProbeResult {
            host_exists: false,
            deliverable: false,
            catch_all: false,
        }
    }

    #[test]
    fn first_preferred_host_decides() {
        let verifier = Verifier::with_parts(two_records(), StubProbe::new(|_| answered(true, false)));
        let outcome = verifier.verify("user@example.com").expect("verdict");
        assert!(outcome.deliverable);
        assert!(!outcome.catch_all);
        assert!(outcome.mx_reachable);
        assert_eq!(outcome.address.addr(), "user@example.com");
        assert_eq!(
            *verifier.probe.calls.borrow(),
            vec!["10 smtp.example.com".to_string()]
        );
    }

    #[test]
    fn records_are_sorted_by_preference_before_probing() {
        let resolver = StubResolver::new(|_| {
            Ok(vec![
                MxRecord::new(21, "smtp.example.l.com"),
                MxRecord::new(10, "smtp.example.com"),
            ])
        });
        let verifier = Verifier::with_parts(resolver, StubProbe::new(|_| answered(false, false)));
        verifier.verify("user@example.com").expect("verdict");
        assert_eq!(
            *verifier.probe.calls.borrow(),
            vec!["10 smtp.example.com".to_string()]
        );
    }

    #[test]
    fn preference_ties_keep_resolver_order() {
        let resolver = StubResolver::new(|_| {
            Ok(vec![
                MxRecord::new(10, "b.example.com"),
                MxRecord::new(10, "a.example.com"),
            ])
        });
        let verifier = Verifier::with_parts(resolver, StubProbe::new(|_| unreachable()));
        verifier.verify("user@example.com").expect("verdict");
        assert_eq!(
            *verifier.probe.calls.borrow(),
            vec![
                "10 b.example.com".to_string(),
                "10 a.example.com".to_string()
            ]
        );
    }

    #[test]
    fn unreachable_first_host_falls_through_to_second() {
        let verifier = Verifier::with_parts(
            two_records(),
            StubProbe::new(|record| {
                if record.exchange == "smtp.example.com" {
                    unreachable()
                } else {
                    answered(true, false)
                }
            }),
        );
        let outcome = verifier.verify("user@example.com").expect("verdict");
        assert!(outcome.deliverable);
        assert!(outcome.mx_reachable);
        assert_eq!(verifier.probe.calls.borrow().len(), 2);
    }

    #[test]
    fn negative_verdict_from_reachable_host_is_final() {
        // The first host answers "not deliverable"; the second is never tried.
        let verifier = Verifier::with_parts(two_records(), StubProbe::new(|_| answered(false, false)));
        let outcome = verifier.verify("user@example.com").expect("verdict");
        assert!(!outcome.deliverable);
        assert!(outcome.mx_reachable);
        assert_eq!(verifier.probe.calls.borrow().len(), 1);
    }

    #[test]
    fn catch_all_verdict_propagates() {
        let verifier = Verifier::with_parts(two_records(), StubProbe::new(|_| answered(false, true)));
        let outcome = verifier.verify("user@example.com").expect("verdict");
        assert!(!outcome.deliverable);
        assert!(outcome.catch_all);
    }

    #[test]
    fn all_hosts_unreachable_reports_mx_unreachable() {
        let verifier = Verifier::with_parts(two_records(), StubProbe::new(|_| unreachable()));
        let outcome = verifier.verify("user@example.com").expect("verdict");
        assert!(!outcome.deliverable);
        assert!(!outcome.catch_all);
        assert!(!outcome.mx_reachable);
        assert_eq!(verifier.probe.calls.borrow().len(), 2);
    }

    #[test]
    fn resolution_error_reports_mx_unreachable() {
        let resolver = StubResolver::new(|_| Err(crate::mx::Error::EmptyDomain));
        let verifier = Verifier::with_parts(resolver, StubProbe::new(|_| answered(true, false)));
        let outcome = verifier.verify("user@example.com").expect("verdict");
        assert!(!outcome.mx_reachable);
        assert!(verifier.probe.calls.borrow().is_empty());
    }

    #[test]
    fn empty_record_set_reports_mx_unreachable() {
        let resolver = StubResolver::new(|_| Ok(Vec::new()));
        let verifier = Verifier::with_parts(resolver, StubProbe::new(|_| answered(true, false)));
        let outcome = verifier.verify("user@example.com").expect("verdict");
        assert!(!outcome.mx_reachable);
    }

    #[test]
    fn malformed_input_propagates_format_error() {
        let verifier = Verifier::with_parts(two_records(), StubProbe::new(|_| answered(true, false)));
        let err = verifier.verify("not_an_email").expect_err("must fail");
        assert_eq!(err.to_string(), "address provided is invalid: not_an_email");
        assert!(verifier.probe.calls.borrow().is_empty());
    }

    #[test]
    fn display_name_form_is_accepted() {
        let verifier = Verifier::with_parts(two_records(), StubProbe::new(|_| answered(true, false)));
        let outcome = verifier
            .verify("USER <user@example.com>")
            .expect("verdict");
        assert_eq!(outcome.address.name, "USER");
        assert!(outcome.deliverable);
    }
}
