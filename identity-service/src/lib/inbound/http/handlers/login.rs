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
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;
    let user = state
        .user_service
        .verify_credentials(body.try_into_command()?)
        .await?;

    let token = state
        .token_service
        .issue(&user.id, user.email.as_str())
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    Ok(ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

/// HTTP request body for a local login (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseLoginRequestError {
    #[error("Email is required")]
    MissingEmail,

    #[error("Password is required")]
    MissingPassword,

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ParseLoginRequestError> {
        let email = self.email.ok_or(ParseLoginRequestError::MissingEmail)?;
        let email = EmailAddress::new(email)?;
        let password = self
            .password
            .filter(|password| !password.is_empty())
            .ok_or(ParseLoginRequestError::MissingPassword)?;

        Ok(LoginCommand { email, password })
    }
}

impl From<ParseLoginRequestError> for ApiError {
    fn from(err: ParseLoginRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
