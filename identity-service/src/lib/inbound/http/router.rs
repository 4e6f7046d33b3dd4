use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use oauth2::url::Url;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::google::google_callback;
use super::handlers::google::google_login;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::update_username::update_username;
use super::middleware::authenticate as auth_middleware;
use crate::domain::federation::ports::FederationServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub federation_service: Arc<dyn FederationServicePort>,
    pub token_service: Arc<TokenService>,
    pub frontend_url: Url,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    federation_service: Arc<dyn FederationServicePort>,
    token_service: Arc<TokenService>,
    frontend_url: Url,
) -> Router {
    let state = AppState {
        user_service,
        federation_service,
        token_service,
        frontend_url,
    };

    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/google", get(google_login))
        .route("/google/callback", get(google_callback));

    let protected_routes = Router::new()
        .route("/me", get(me))
        .route("/username", put(update_username))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out: they carry bearer tokens.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/health", get(health))
        .nest(
            "/api/v1/auth",
            public_routes.merge(protected_routes),
        )
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
