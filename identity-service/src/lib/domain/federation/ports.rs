use async_trait::async_trait;

use crate::domain::federation::errors::FederationError;
use crate::domain::federation::errors::ProviderError;
use crate::domain::federation::models::AuthorizationRequest;
use crate::domain::federation::models::ProviderCallback;
use crate::domain::federation::models::ProviderProfile;
use crate::domain::user::models::User;

/// Third-party identity provider speaking the authorization-code flow.
///
/// Constructed once at startup and injected; holds no per-request state.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Consent URL the browser is redirected to.
    ///
    /// # Arguments
    /// * `state` - Opaque value the provider must echo back on the callback
    ///
    /// # Errors
    /// * `Authorization` - URL could not be built
    fn authorization_url(&self, state: &str) -> Result<String, ProviderError>;

    /// Exchange an authorization code for the user's profile.
    ///
    /// # Errors
    /// * `Exchange` - Code was rejected or the token endpoint failed
    /// * `Profile` - Userinfo endpoint failed
    async fn exchange_code(&self, code: &str) -> Result<ProviderProfile, ProviderError>;
}

/// Port for the federated login flow.
#[async_trait]
pub trait FederationServicePort: Send + Sync + 'static {
    /// Start a login: consent URL carrying a fresh signed state.
    ///
    /// The caller binds the returned state to the browser; [`complete`](Self::complete)
    /// only accepts it back from there.
    fn begin(&self) -> Result<AuthorizationRequest, FederationError>;

    /// Finish a login from the provider callback.
    ///
    /// # Returns
    /// The resolved (created or linked) user
    ///
    /// # Errors
    /// * `Provider` - Denied, bad state, missing code, exchange/profile failure, no email
    /// * `Account` - Store failure, including a lost creation race
    async fn complete(&self, callback: ProviderCallback) -> Result<User, FederationError>;
}
