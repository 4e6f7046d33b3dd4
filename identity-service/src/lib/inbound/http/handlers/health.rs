use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn health() -> ApiSuccess<HealthResponseData> {
    ApiSuccess::new(StatusCode::OK, HealthResponseData { ok: true })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub ok: bool,
}
