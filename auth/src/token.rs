use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::jwt::JwtHandler;
use crate::jwt::StateClaims;
use crate::jwt::TokenClaims;
use crate::jwt::TokenError;

/// Issues and verifies stateless bearer tokens.
///
/// Holds the only process-wide secret. Built once at startup and shared
/// read-only; verification consults nothing but the token and the secret.
pub struct TokenService {
    handler: JwtHandler,
    validity: Duration,
    state_validity: Duration,
}

impl TokenService {
    /// Access tokens are valid for seven days from issuance.
    pub const TOKEN_VALIDITY_DAYS: i64 = 7;

    /// OAuth `state` values are valid for ten minutes.
    pub const STATE_VALIDITY_MINUTES: i64 = 10;

    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            handler: JwtHandler::new(secret),
            validity: Duration::days(Self::TOKEN_VALIDITY_DAYS),
            state_validity: Duration::minutes(Self::STATE_VALIDITY_MINUTES),
        })
    }

    /// Issue an access token for a user, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: impl ToString, email: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue an access token whose validity window starts at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: impl ToString,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims::new(user_id, email, issued_at, self.validity);
        self.handler.encode(&claims)
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `Malformed` - Not a token, or not an access token
    /// * `Expired` - Validity window has elapsed
    /// * `InvalidSignature` - Signed with another secret
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.handler.decode(token)
    }

    /// Issue a signed, short-lived OAuth `state` value.
    pub fn issue_state(&self) -> Result<String, TokenError> {
        let claims = StateClaims::new(Uuid::new_v4().to_string(), Utc::now(), self.state_validity);
        self.handler.encode(&claims)
    }

    /// Verify an OAuth `state` value previously produced by [`issue_state`](Self::issue_state).
    pub fn verify_state(&self, state: &str) -> Result<(), TokenError> {
        let claims: StateClaims = self.handler.decode(state)?;
        if claims.purpose != StateClaims::PURPOSE {
            return Err(TokenError::Malformed("Unexpected token purpose".to_string()));
        }
        Ok(())
    }
}
