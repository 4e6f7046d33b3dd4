use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::ProfilePatch;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for local accounts.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
    /// Verified against when no stored hash exists, so every login pays one Argon2 run.
    decoy_hash: OnceCell<String>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
            decoy_hash: OnceCell::new(),
        }
    }

    /// Spend the same hashing effort as a real check, then reject.
    async fn reject_without_hash(&self, password: &str) -> Result<User, UserError> {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.password_hasher.hash("decoy-password"))
            .await?;
        self.password_hasher.verify(password, decoy).await?;
        Err(UserError::InvalidCredentials)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(command.password.expose()).await?;

        // No existence check here: the store's unique index decides the race.
        let user = self
            .repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                password_hash: Some(password_hash),
                provider_id: None,
                avatar: None,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Local account registered");
        Ok(user)
    }

    async fn verify_credentials(&self, command: LoginCommand) -> Result<User, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            return self.reject_without_hash(&command.password).await;
        };

        let Some(stored_hash) = user.password_hash.as_deref() else {
            tracing::debug!(user_id = %user.id, "Password login attempted on federated-only account");
            return self.reject_without_hash(&command.password).await;
        };

        if !self
            .password_hasher
            .verify(&command.password, stored_hash)
            .await?
        {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn rename_user(&self, id: &UserId, name: UserName) -> Result<User, UserError> {
        let patch = ProfilePatch {
            name: Some(name),
            ..ProfilePatch::default()
        };
        self.repository.update_profile(id, patch).await
    }
}
