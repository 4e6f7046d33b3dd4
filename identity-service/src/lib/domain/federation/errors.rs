use thiserror::Error;

use crate::user::errors::EmailError;
use crate::user::errors::UserError;

/// Failure inside the provider leg of the callback.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Provider denied the request: {0}")]
    Denied(String),

    #[error("Invalid or expired OAuth state")]
    InvalidState,

    #[error("Authorization code missing from callback")]
    MissingCode,

    #[error("Token exchange failed: {0}")]
    Exchange(String),

    #[error("Fetching provider profile failed: {0}")]
    Profile(String),

    #[error("Provider profile has no email")]
    MissingEmail,

    #[error("Provider profile email is invalid: {0}")]
    InvalidEmail(EmailError),

    #[error("Could not build authorization request: {0}")]
    Authorization(String),
}

/// Any failure of the federated login flow.
///
/// Never rendered as JSON; the callback boundary turns it into a redirect.
#[derive(Debug, Clone, Error)]
pub enum FederationError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Account resolution failed: {0}")]
    Account(#[from] UserError),
}
