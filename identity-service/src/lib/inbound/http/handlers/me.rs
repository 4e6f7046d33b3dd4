use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Profile of the token's subject. 404 when the subject no longer exists.
pub async fn me(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .user_service
        .get_user(&current_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
