use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// Serialized as `{"userId", "email", "iat", "exp"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// Identifier of the authenticated user
    pub user_id: String,

    /// Email of the authenticated user at issuance time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims valid for `validity` starting at `issued_at`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email
    /// * `issued_at` - Start of the validity window
    /// * `validity` - Length of the validity window
    pub fn new(
        user_id: impl ToString,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + validity).timestamp(),
        }
    }
}

/// Claims carried by the OAuth `state` parameter.
///
/// The `purpose` field keeps a state value from being accepted as an
/// access token and the other way around.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateClaims {
    pub purpose: String,
    pub nonce: String,
    pub iat: i64,
    pub exp: i64,
}

impl StateClaims {
    pub const PURPOSE: &'static str = "oauth_state";

    pub fn new(nonce: impl Into<String>, issued_at: DateTime<Utc>, validity: Duration) -> Self {
        Self {
            purpose: Self::PURPOSE.to_string(),
            nonce: nonce.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + validity).timestamp(),
        }
    }
}
