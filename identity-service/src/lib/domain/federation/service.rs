use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenService;

use crate::domain::federation::errors::FederationError;
use crate::domain::federation::errors::ProviderError;
use crate::domain::federation::linker::AccountLinker;
use crate::domain::federation::models::AuthorizationRequest;
use crate::domain::federation::models::FederatedIdentity;
use crate::domain::federation::models::ProviderCallback;
use crate::domain::federation::ports::FederationServicePort;
use crate::domain::federation::ports::IdentityProvider;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Callback step of the authorization-code flow.
///
/// Checks the signed state, exchanges the code through the injected
/// provider, and hands the resulting identity to the [`AccountLinker`].
pub struct OAuthFederator<IP, UR>
where
    IP: IdentityProvider,
    UR: UserRepository,
{
    provider: Arc<IP>,
    linker: AccountLinker<UR>,
    tokens: Arc<TokenService>,
}

impl<IP, UR> OAuthFederator<IP, UR>
where
    IP: IdentityProvider,
    UR: UserRepository,
{
    /// # Arguments
    /// * `provider` - Identity provider strategy
    /// * `repository` - Credential store used for linking
    /// * `tokens` - Signs and checks the `state` parameter
    pub fn new(provider: Arc<IP>, repository: Arc<UR>, tokens: Arc<TokenService>) -> Self {
        Self {
            provider,
            linker: AccountLinker::new(repository),
            tokens,
        }
    }
}

#[async_trait]
impl<IP, UR> FederationServicePort for OAuthFederator<IP, UR>
where
    IP: IdentityProvider,
    UR: UserRepository,
{
    fn begin(&self) -> Result<AuthorizationRequest, FederationError> {
        let state = self
            .tokens
            .issue_state()
            .map_err(|e| ProviderError::Authorization(e.to_string()))?;
        let url = self.provider.authorization_url(&state)?;
        Ok(AuthorizationRequest { url, state })
    }

    async fn complete(&self, callback: ProviderCallback) -> Result<User, FederationError> {
        if let Some(error) = callback.error {
            return Err(ProviderError::Denied(error).into());
        }

        let state = callback.state.ok_or(ProviderError::InvalidState)?;
        if callback.browser_state.as_deref() != Some(state.as_str()) {
            tracing::warn!("OAuth state was not issued to this browser");
            return Err(ProviderError::InvalidState.into());
        }
        self.tokens.verify_state(&state).map_err(|e| {
            tracing::warn!(reason = %e, "OAuth state rejected");
            ProviderError::InvalidState
        })?;

        let code = callback
            .code
            .filter(|code| !code.is_empty())
            .ok_or(ProviderError::MissingCode)?;

        let profile = self.provider.exchange_code(&code).await?;
        let identity = FederatedIdentity::try_from(profile)?;

        Ok(self.linker.link(identity).await?)
    }
}
