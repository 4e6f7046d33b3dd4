use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::AuthUrl;
use oauth2::AuthorizationCode;
use oauth2::ClientId;
use oauth2::ClientSecret;
use oauth2::CsrfToken;
use oauth2::EndpointNotSet;
use oauth2::EndpointSet;
use oauth2::RedirectUrl;
use oauth2::Scope;
use oauth2::TokenResponse;
use oauth2::TokenUrl;
use serde::Deserialize;

use crate::config::Config;
use crate::domain::federation::errors::ProviderError;
use crate::domain::federation::models::ProviderProfile;
use crate::domain::federation::ports::IdentityProvider;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Path of the callback route, relative to the public base URL.
pub const CALLBACK_PATH: &str = "/api/v1/auth/google/callback";

/// Google user info from API.
#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: Option<String>,
    verified_email: Option<bool>,
    name: Option<String>,
    picture: Option<String>,
}

impl From<GoogleUser> for ProviderProfile {
    fn from(user: GoogleUser) -> Self {
        Self {
            provider_id: user.id,
            email: user.email,
            email_verified: user.verified_email,
            display_name: user.name,
            avatar_url: user.picture,
        }
    }
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google identity provider.
///
/// Requests the `profile` and `email` scopes and reads the profile from the
/// userinfo endpoint.
pub struct GoogleIdentityProvider {
    client: ConfiguredClient,
    http_client: reqwest::Client,
}

impl GoogleIdentityProvider {
    /// Build the provider from startup configuration.
    ///
    /// # Errors
    /// * `Authorization` - An endpoint URL is invalid, or the HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let redirect_url = format!(
            "{}{}",
            config.server.public_url.trim_end_matches('/'),
            CALLBACK_PATH
        );

        let client = BasicClient::new(ClientId::new(config.google.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.google.client_secret.clone()))
            .set_auth_uri(
                AuthUrl::new(AUTH_URL.to_string())
                    .map_err(|e| ProviderError::Authorization(e.to_string()))?,
            )
            .set_token_uri(
                TokenUrl::new(TOKEN_URL.to_string())
                    .map_err(|e| ProviderError::Authorization(e.to_string()))?,
            )
            .set_redirect_uri(
                RedirectUrl::new(redirect_url)
                    .map_err(|e| ProviderError::Authorization(e.to_string()))?,
            );

        // The token endpoint must not be followed through redirects.
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ProviderError::Authorization(e.to_string()))?;

        Ok(Self {
            client,
            http_client,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self, state: &str) -> Result<String, ProviderError> {
        let state = state.to_string();
        let (auth_url, _) = self
            .client
            .authorize_url(move || CsrfToken::new(state))
            .add_scope(Scope::new("profile".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .url();

        Ok(auth_url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderProfile, ProviderError> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| ProviderError::Exchange(e.to_string()))?;

        let google_user: GoogleUser = self
            .http_client
            .get(USERINFO_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| ProviderError::Profile(e.to_string()))?
            .json()
            .await
            .map_err(|e| ProviderError::Profile(e.to_string()))?;

        tracing::debug!(provider_id = %google_user.id, "Google profile fetched");
        Ok(google_user.into())
    }
}
