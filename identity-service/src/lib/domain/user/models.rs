use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UserNameError;

/// User aggregate entity.
///
/// One record per email. Local and federated credentials live side by side:
/// `password_hash` is set by local registration, `provider_id` by the first
/// federated login. Neither is ever removed once set.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Option<UserName>,
    pub email: EmailAddress,
    pub password_hash: Option<String>,
    pub provider_id: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Which credentials this account can authenticate with.
    pub fn credential_state(&self) -> CredentialState {
        match (self.password_hash.is_some(), self.provider_id.is_some()) {
            (true, true) => CredentialState::Linked,
            (true, false) => CredentialState::LocalOnly,
            (false, true) => CredentialState::FederatedOnly,
            (false, false) => CredentialState::Unusable,
        }
    }
}

/// Credential lifecycle of a user.
///
/// Transitions only ever add a credential:
/// `LocalOnly -> Linked`. `FederatedOnly` and `Linked` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    LocalOnly,
    FederatedOnly,
    Linked,
    /// Neither credential is set; no login path exists.
    Unusable,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Trimmed, non-blank, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `Blank` - Name is empty after trimming
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserNameError> {
        let name = name.as_ref().trim();
        let length = name.chars().count();
        if length == 0 {
            Err(UserNameError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser, trimmed and lower-cased. The unique
/// index in storage is over this normalised form, so `A@X.com` and `a@x.com`
/// are the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let email = email.as_ref().trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted for registration.
///
/// Deliberately no `Display`; `Debug` is redacted.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new local account
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub name: Option<UserName>,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterUserCommand {
    pub fn new(name: Option<UserName>, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to check local credentials
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Fields handed to the store when creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<UserName>,
    pub email: EmailAddress,
    pub password_hash: Option<String>,
    pub provider_id: Option<String>,
    pub avatar: Option<String>,
}

impl NewUser {
    /// Materialise the entity with a fresh id and timestamps.
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            id: UserId::new(),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            provider_id: self.provider_id,
            avatar: self.avatar,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial profile update.
///
/// `name` replaces the stored value. `provider_id` and `avatar` only fill a
/// gap: the store keeps an already-set value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub name: Option<UserName>,
    pub provider_id: Option<String>,
    pub avatar: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.provider_id.is_none() && self.avatar.is_none()
    }

    /// Apply the patch to an in-memory entity with the same rules the store uses.
    pub fn apply_to(&self, user: &mut User, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            user.name = Some(name.clone());
        }
        if user.provider_id.is_none() {
            user.provider_id = self.provider_id.clone();
        }
        if user.avatar.is_none() {
            user.avatar = self.avatar.clone();
        }
        user.updated_at = now;
    }
}
