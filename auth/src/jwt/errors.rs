use thiserror::Error;

/// Error type for bearer token operations.
///
/// `Malformed`, `Expired` and `InvalidSignature` are the verification
/// outcomes; callers are expected to collapse them into one external answer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Signing secret is missing")]
    MissingSecret,
}
