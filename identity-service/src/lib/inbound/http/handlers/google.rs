use auth::TokenService;
use axum::extract::Query;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use oauth2::url::Url;
use serde::Deserialize;

use crate::domain::federation::models::ProviderCallback;
use crate::inbound::http::router::AppState;

/// Cookie binding a pending login to the browser that started it.
const STATE_COOKIE: &str = "oauth_state";

/// Covers both the login route and its callback.
const STATE_COOKIE_PATH: &str = "/api/v1/auth/google";

/// Send the browser to the provider's consent page.
pub async fn google_login(State(state): State<AppState>) -> Response {
    match state.federation_service.begin() {
        Ok(request) => found_with_cookie(
            request.url,
            state_cookie(&request.state, TokenService::STATE_VALIDITY_MINUTES * 60),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to start Google login");
            found(frontend_location(&state.frontend_url, "error", None))
        }
    }
}

/// Provider redirect target.
///
/// Always answers with a redirect to the frontend: `/auth/success?token=...`
/// or `/auth/error`. Federation failures never surface as JSON. The state
/// cookie is cleared either way.
pub async fn google_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let clear_cookie = state_cookie("", 0);
    let callback = query.into_callback(browser_state(&headers));

    let user = match state.federation_service.complete(callback).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Google login failed");
            return found_with_cookie(
                frontend_location(&state.frontend_url, "error", None),
                clear_cookie,
            );
        }
    };

    let location = match state.token_service.issue(&user.id, user.email.as_str()) {
        Ok(token) => {
            tracing::info!(user_id = %user.id, "Google login succeeded");
            frontend_location(&state.frontend_url, "success", Some(&token))
        }
        Err(e) => {
            tracing::error!(user_id = %user.id, error = %e, "Failed to issue token");
            frontend_location(&state.frontend_url, "error", None)
        }
    };

    found_with_cookie(location, clear_cookie)
}

/// Query string appended by the provider (raw)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

impl CallbackQuery {
    fn into_callback(self, browser_state: Option<String>) -> ProviderCallback {
        ProviderCallback {
            code: self.code,
            state: self.state,
            error: self.error,
            browser_state,
        }
    }
}

/// 302 with a `Location` header.
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn found_with_cookie(location: String, cookie: String) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location), (header::SET_COOKIE, cookie)],
    )
        .into_response()
}

fn state_cookie(value: &str, max_age_secs: i64) -> String {
    format!(
        "{STATE_COOKIE}={value}; Max-Age={max_age_secs}; Path={STATE_COOKIE_PATH}; HttpOnly; SameSite=Lax"
    )
}

/// Value of the state cookie, if the browser sent one.
fn browser_state(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == STATE_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `<frontend>/auth/<outcome>`, optionally carrying the token as a query pair.
fn frontend_location(frontend: &Url, outcome: &str, token: Option<&str>) -> String {
    let mut location = frontend.clone();
    if let Ok(mut segments) = location.path_segments_mut() {
        segments.pop_if_empty().extend(["auth", outcome]);
    }
    if let Some(token) = token {
        location.query_pairs_mut().append_pair("token", token);
    }
    location.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_location() {
        let frontend = Url::parse("http://localhost:3000").unwrap();

        assert_eq!(
            frontend_location(&frontend, "success", Some("a.b-c_d")),
            "http://localhost:3000/auth/success?token=a.b-c_d"
        );
    }

    #[test]
    fn test_error_location_keeps_base_path() {
        let frontend = Url::parse("https://example.com/app/").unwrap();

        assert_eq!(
            frontend_location(&frontend, "error", None),
            "https://example.com/app/auth/error"
        );
    }

    #[test]
    fn test_state_cookie_round_trip() {
        let cookie = state_cookie("signed.state.value", 600);
        assert_eq!(
            cookie,
            "oauth_state=signed.state.value; Max-Age=600; Path=/api/v1/auth/google; HttpOnly; SameSite=Lax"
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; oauth_state=signed.state.value".parse().unwrap(),
        );
        assert_eq!(
            browser_state(&headers).as_deref(),
            Some("signed.state.value")
        );
    }

    #[test]
    fn test_missing_or_cleared_cookie() {
        assert_eq!(browser_state(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "oauth_state=".parse().unwrap());
        assert_eq!(browser_state(&headers), None);
    }

    #[test]
    fn test_found_sets_location() {
        let response = found("https://accounts.example/consent".to_string());

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://accounts.example/consent"
        );
    }
}
