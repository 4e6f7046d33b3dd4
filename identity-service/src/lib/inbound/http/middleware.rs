use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated subject in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Middleware that verifies the bearer token and adds its subject to request extensions.
///
/// Every failure gets the same 401; the reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req).map_err(|reason| {
        tracing::debug!(reason, "Request rejected");
        unauthorized()
    })?;

    let claims = state.token_service.verify(token).map_err(|e| {
        tracing::warn!(reason = %e, "Token rejected");
        unauthorized()
    })?;

    let user_id = UserId::from_string(&claims.user_id).map_err(|e| {
        tracing::warn!(reason = %e, "Token subject is not a user id");
        unauthorized()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Unauthorized".to_string())
}

fn extract_bearer_token(req: &Request) -> Result<&str, &'static str> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Authorization header is not valid ASCII")?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or("Authorization scheme is not Bearer")
}
