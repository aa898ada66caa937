use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

pub struct ApiError(pub nt_core::Error);

impl From<nt_core::Error> for ApiError {
    fn from(err: nt_core::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            nt_core::Error::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {}", what)),
            nt_core::Error::InvalidInput(why) => (StatusCode::BAD_REQUEST, why.clone()),
            nt_core::Error::ReadOnly(why) => (StatusCode::METHOD_NOT_ALLOWED, why.clone()),
            err if err.is_upstream() => {
                error!("❌ Article service failure: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "Unable to load coverage comparison".to_string(),
                )
            }
            err => {
                error!("❌ Request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
