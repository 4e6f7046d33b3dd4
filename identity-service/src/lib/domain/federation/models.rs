use crate::domain::federation::errors::ProviderError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserName;

/// Profile returned by the identity provider after a successful code exchange.
///
/// Fields are as the provider reported them; nothing is validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    /// Provider subject id
    pub provider_id: String,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Start of a federated login: where to send the browser, and the state
/// value the browser must present again on the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// Query parameters the provider appends to the callback redirect, plus
/// the state value the starting browser was handed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    /// State bound to the browser when the login began
    pub browser_state: Option<String>,
}

/// A provider profile that is usable for account linking.
#[derive(Debug, Clone, PartialEq)]
pub struct FederatedIdentity {
    pub provider_id: String,
    pub email: EmailAddress,
    pub display_name: Option<UserName>,
    pub avatar_url: Option<String>,
}

impl TryFrom<ProviderProfile> for FederatedIdentity {
    type Error = ProviderError;

    /// An absent or invalid email is a provider failure. An unusable display
    /// name is dropped rather than failing the login.
    fn try_from(profile: ProviderProfile) -> Result<Self, Self::Error> {
        let email = profile
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or(ProviderError::MissingEmail)?;
        let email = EmailAddress::new(email).map_err(ProviderError::InvalidEmail)?;

        if profile.email_verified == Some(false) {
            tracing::warn!(
                provider_id = %profile.provider_id,
                "Provider reports email as unverified; linking by email anyway"
            );
        }

        Ok(Self {
            provider_id: profile.provider_id,
            email,
            display_name: profile.display_name.and_then(|n| UserName::new(n).ok()),
            avatar_url: profile.avatar_url.filter(|url| !url.is_empty()),
        })
    }
}
