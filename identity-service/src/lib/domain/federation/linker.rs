use std::sync::Arc;

use crate::domain::federation::models::FederatedIdentity;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::ProfilePatch;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Merge policy for federated logins.
///
/// Email is the only linking key. An existing account gains the provider id
/// and avatar if it has none; nothing already set is ever overwritten.
/// An unseen email becomes a federated-only account without a password.
pub struct AccountLinker<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> AccountLinker<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }

    /// Resolve a federated identity to exactly one user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - A concurrent creation for the same email won
    /// * `NotFound` - The matched user vanished before the link was written
    /// * `DatabaseError` - Database operation failed
    pub async fn link(&self, identity: FederatedIdentity) -> Result<User, UserError> {
        let Some(user) = self.repository.find_by_email(&identity.email).await? else {
            let user = self
                .repository
                .create(NewUser {
                    name: identity.display_name,
                    email: identity.email,
                    password_hash: None,
                    provider_id: Some(identity.provider_id),
                    avatar: identity.avatar_url,
                })
                .await?;
            tracing::info!(user_id = %user.id, "Federated account created");
            return Ok(user);
        };

        let patch = Self::fill_gaps(&user, identity);
        if patch.is_empty() {
            return Ok(user);
        }

        let linked = self.repository.update_profile(&user.id, patch).await?;
        tracing::info!(
            user_id = %linked.id,
            credential_state = ?linked.credential_state(),
            "Federated identity linked to existing account"
        );
        Ok(linked)
    }

    fn fill_gaps(user: &User, identity: FederatedIdentity) -> ProfilePatch {
        ProfilePatch {
            name: None,
            provider_id: user
                .provider_id
                .is_none()
                .then_some(identity.provider_id),
            avatar: identity.avatar_url.filter(|_| user.avatar.is_none()),
        }
    }
}
