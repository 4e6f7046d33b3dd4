use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::ProfilePatch;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// In-process credential store.
///
/// The email check and the insert happen under one write lock, which plays
/// the role of the unique index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let user = user.into_user(Utc::now());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn update_profile(&self, id: &UserId, patch: ProfilePatch) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or(UserError::NotFound(id.to_string()))?;

        patch.apply_to(user, Utc::now());
        Ok(user.clone())
    }
}
