use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::ProfilePatch;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a local account.
    ///
    /// # Arguments
    /// * `command` - Validated name, email and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered (including a lost race)
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Check local credentials.
    ///
    /// # Returns
    /// The user owning the credentials
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, or no local password
    /// * `Password` - Stored hash is malformed
    /// * `DatabaseError` - Database operation failed
    async fn verify_credentials(&self, command: LoginCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Replace the display name of a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn rename_user(&self, id: &UserId, name: UserName) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate (the credential store).
///
/// Email uniqueness must be enforced by the store itself, not by callers
/// reading first.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Unique email constraint rejected the insert
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Apply a profile patch.
    ///
    /// `provider_id` and `avatar` are written only where currently unset.
    ///
    /// # Errors
    /// * `NotFound` - Id no longer resolves
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(&self, id: &UserId, patch: ProfilePatch) -> Result<User, UserError>;
}
