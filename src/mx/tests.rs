use super::{Error, MxRecord, MxResolver, resolver};

type LookupResult = Result<Vec<MxRecord>, Error>;
type LookupFn = dyn Fn(&str) -> LookupResult;

pub(crate) struct StubResolver {
    pub on_lookup: Box<LookupFn>,
}

impl StubResolver {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> LookupResult + 'static,
    {
        Self {
            on_lookup: Box::new(f),
        }
    }
}

impl MxResolver for StubResolver {
    fn resolve(&self, domain: &str) -> LookupResult {
        (self.on_lookup)(domain)
    }
}

#[test]
fn normalize_domain_rejects_empty() {
    let err = resolver::normalize_domain("").expect_err("empty domain should fail");
    assert!(matches!(err, Error::EmptyDomain));
}

#[test]
fn normalize_domain_converts_idna() {
    let ascii = resolver::normalize_domain("exämple.com").expect("idna conversion");
    assert_eq!(ascii, "xn--exmple-cua.com");
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = resolver::normalize_exchange("Mail.EXAMPLE.com.".to_string());
    assert_eq!(out, "mail.example.com");
}

#[test]
fn record_displays_as_dns_text() {
    let record = MxRecord::new(10, "smtp.example.com");
    assert_eq!(record.to_string(), "10 smtp.example.com");
}

#[test]
fn stub_resolver_passes_domain_through() {
    let stub = StubResolver::new(|domain| {
        assert_eq!(domain, "example.com");
        Ok(vec![MxRecord::new(10, "mx1.example.com")])
    });
    let records = stub.resolve("example.com").expect("lookup succeeds");
    assert_eq!(records.len(), 1);
}
