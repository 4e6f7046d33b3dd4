use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileResponseData;
use crate::domain::user::models::UserName;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserNameError;

pub async fn update_username(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    payload: Result<Json<UpdateUsernameRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let Json(body) = payload?;
    let name = body.try_into_name()?;

    let user = state
        .user_service
        .rename_user(&current_user.user_id, name)
        .await?;

    tracing::info!(user_id = %user.id, "Display name updated");
    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}

/// HTTP request body for renaming the current user (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUsernameRequest {
    name: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateUsernameRequestError {
    #[error(transparent)]
    Name(#[from] UserNameError),
}

impl UpdateUsernameRequest {
    fn try_into_name(self) -> Result<UserName, ParseUpdateUsernameRequestError> {
        Ok(UserName::new(self.name.unwrap_or_default())?)
    }
}

impl From<ParseUpdateUsernameRequestError> for ApiError {
    fn from(err: ParseUpdateUsernameRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
