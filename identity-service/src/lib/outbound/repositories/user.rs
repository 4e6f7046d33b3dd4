use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::ProfilePatch;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL credential store.
///
/// Email uniqueness is the `users_email_key` constraint; the first-write-wins
/// rule for `provider_id` and `avatar` lives in the UPDATE statement.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRecord {
    id: Uuid,
    name: Option<String>,
    email: String,
    password_hash: Option<String>,
    provider_id: Option<String>,
    avatar: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRecord> for User {
    type Error = UserError;

    fn try_from(r: UserRecord) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(r.id),
            name: r.name.map(UserName::new).transpose()?,
            email: EmailAddress::new(r.email)?,
            password_hash: r.password_hash,
            provider_id: r.provider_id,
            avatar: r.avatar,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let user = user.into_user(Utc::now());

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, provider_id, avatar, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.0)
        .bind(user.name.as_ref().map(UserName::as_str))
        .bind(user.email.as_str())
        .bind(user.password_hash.as_deref())
        .bind(user.provider_id.as_deref())
        .bind(user.avatar.as_deref())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return UserError::EmailAlreadyExists(user.email.to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, provider_id, avatar, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        record.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, provider_id, avatar, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        record.map(User::try_from).transpose()
    }

    async fn update_profile(&self, id: &UserId, patch: ProfilePatch) -> Result<User, UserError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                provider_id = COALESCE(provider_id, $3),
                avatar = COALESCE(avatar, $4),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, password_hash, provider_id, avatar, created_at, updated_at
            "#,
        )
        .bind(id.0)
        .bind(patch.name.as_ref().map(UserName::as_str))
        .bind(patch.provider_id.as_deref())
        .bind(patch.avatar.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        record
            .map(User::try_from)
            .transpose()?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
