use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UserName;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserNameError;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;
    let user = state
        .user_service
        .register(body.try_into_command()?)
        .await?;

    let token = state
        .token_service
        .issue(&user.id, user.email.as_str())
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        TokenResponseData { token },
    ))
}

/// HTTP request body for registering a local account (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Email is required")]
    MissingEmail,

    #[error("Password is required")]
    MissingPassword,

    #[error("Invalid name: {0}")]
    Name(#[from] UserNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let email = self
            .email
            .ok_or(ParseRegisterRequestError::MissingEmail)?;
        let email = EmailAddress::new(email)?;
        let password = self
            .password
            .ok_or(ParseRegisterRequestError::MissingPassword)?;
        let password = Password::new(password)?;

        // A blank name is the same as no name
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => Some(UserName::new(name)?),
            _ => None,
        };

        Ok(RegisterUserCommand::new(name, email, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>, password: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_request() {
        let command = request(Some("  Ann "), Some("A@X.com"), Some("secret123"))
            .try_into_command()
            .unwrap();

        assert_eq!(command.name.unwrap().as_str(), "Ann");
        assert_eq!(command.email.as_str(), "a@x.com");
        assert_eq!(command.password.expose(), "secret123");
    }

    #[test]
    fn test_blank_name_is_absent() {
        let command = request(Some("   "), Some("a@x.com"), Some("secret123"))
            .try_into_command()
            .unwrap();

        assert!(command.name.is_none());
    }

    #[test]
    fn test_missing_fields() {
        let err = request(None, None, Some("secret123"))
            .try_into_command()
            .unwrap_err();
        assert_eq!(err.to_string(), "Email is required");

        let err = request(None, Some("a@x.com"), None)
            .try_into_command()
            .unwrap_err();
        assert_eq!(err.to_string(), "Password is required");
    }

    #[test]
    fn test_short_password() {
        let err = request(None, Some("a@x.com"), Some("12345"))
            .try_into_command()
            .unwrap_err();

        assert!(matches!(err, ParseRegisterRequestError::Password(_)));
    }

    #[test]
    fn test_invalid_email() {
        let err = request(None, Some("not-an-email"), Some("secret123"))
            .try_into_command()
            .unwrap_err();

        assert!(matches!(err, ParseRegisterRequestError::Email(_)));
    }
}
