use crate::address::Address;

/// Final verdict of [`Verifier::verify`](super::Verifier::verify).
///
/// `mx_reachable = false` means no mail exchanger for the domain answered, so
/// no deliverability or catch-all determination was possible — distinct from
/// a host-confirmed "not deliverable".
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub address: Address,
    pub deliverable: bool,
    pub catch_all: bool,
    pub mx_reachable: bool,
}

impl VerificationOutcome {
    pub(crate) fn unreachable(address: Address) -> Self {
        Self {
            address,
            deliverable: false,
            catch_all: false,
            mx_reachable: false,
        }
    }
}
