//! Authentication utilities library
//!
//! Provides the credential primitives of the identity service:
//! - Password hashing (Argon2id, fixed cost, per-call salt)
//! - Stateless bearer token issuance and verification (HS256)
//! - Signed OAuth `state` values
//!
//! Nothing here knows about HTTP or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").await.unwrap();
//! assert!(hasher.verify("my_password", &hash).await.unwrap());
//! # });
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = tokens.issue("user123", "a@x.com").unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.email, "a@x.com");
//! ```

pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenService;
