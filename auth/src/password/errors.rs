use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Password worker failed: {0}")]
    TaskFailed(String),
}
