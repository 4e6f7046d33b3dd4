use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod google;
pub mod health;
pub mod login;
pub mod me;
pub mod register;
pub mod update_username;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

/// Error body: `{"status": 401, "error": "Invalid credentials"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(status: StatusCode, error: String) -> Self {
        Self {
            status: status.as_u16(),
            error,
        }
    }
}

/// Issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token: String,
}

/// Public view of a user. Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub name: Option<String>,
    pub email: String,
    pub avatar: Option<String>,
}

impl From<&User> for ProfileResponseData {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.as_ref().map(|name| name.as_str().to_string()),
            email: user.email.as_str().to_string(),
            avatar: user.avatar.clone(),
        }
    }
}
