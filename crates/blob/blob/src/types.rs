use std::time::Duration;

/// A time-limited, capability-bearing download URL.
///
/// Any holder can use it without further authorization until
/// `expires_in` has elapsed from issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    /// The full URL, signature included.
    pub url: String,
    /// Validity window from the moment of issuance.
    pub expires_in: Duration,
}
