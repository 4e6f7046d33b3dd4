use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Memory cost in KiB.
const MEMORY_COST: u32 = 19_456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Password hashing implementation.
///
/// Argon2id with a fixed cost factor and a fresh random salt per call.
/// Both operations run on the blocking thread pool so the calling request
/// only suspends, it never stalls the async runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    /// * `TaskFailed` - Blocking worker panicked or was cancelled
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|e| PasswordError::TaskFailed(e.to_string()))?
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`. Only a hash that cannot be parsed is an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is not a valid PHC string
    /// * `TaskFailed` - Blocking worker panicked or was cancelled
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
            .await
            .map_err(|e| PasswordError::TaskFailed(e.to_string()))?
    }
}

fn argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, None)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn hash_blocking(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    // Parameters are read from the PHC string, not from our constants.
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).await.expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher
            .verify(password, &hash)
            .await
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .await
            .expect("Failed to verify password"));
    }

    #[tokio::test]
    async fn test_same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("secret123").await.unwrap();
        let second = hasher.hash("secret123").await.unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret123", &first).await.unwrap());
        assert!(hasher.verify("secret123", &second).await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_uses_fixed_cost() {
        let hash = PasswordHasher::new().hash("secret123").await.unwrap();
        assert!(hash.contains("m=19456,t=2,p=1"));
    }

    #[tokio::test]
    async fn test_verify_malformed_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash").await;
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }
}
