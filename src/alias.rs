//! Random probe-address generation used for catch-all detection.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Long enough that a collision with a real mailbox is practically impossible.
const LOCAL_PART_LEN: usize = 24;

/// Returns a fresh `<random-local-part>@<domain>` address. The local part is
/// alphanumeric, so it needs no SMTP escaping.
pub fn random_email(domain: &str) -> String {
    random_email_with_rng(&mut rand::thread_rng(), domain)
}

/// Same as [`random_email`], drawing from a caller-provided random source.
pub fn random_email_with_rng<R: Rng>(rng: &mut R, domain: &str) -> String {
    let local: String = std::iter::repeat_with(|| rng.sample(Alphanumeric))
        .take(LOCAL_PART_LEN)
        .map(char::from)
        .collect();
    format!("{local}@{domain}")
}
