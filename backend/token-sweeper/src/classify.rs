//! Classification of push provider error codes.
//!
//! Codes may carry a vendor namespace (`messaging/...`); only the part after
//! the last `/` is compared.

/// What to do with a token after a failed send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The token will never work again and should be removed
    Prunable,
    /// Anything else; the token is left alone
    Other,
}

const PRUNABLE_CODES: &[&str] = &[
    "registration-token-not-registered",
    "invalid-registration-token",
    "UNREGISTERED",
    "NOT_FOUND",
];

pub fn classify(code: &str) -> FailureKind {
    let bare = code.rsplit('/').next().unwrap_or(code).trim();

    if PRUNABLE_CODES.contains(&bare) {
        FailureKind::Prunable
    } else {
        FailureKind::Other
    }
}
