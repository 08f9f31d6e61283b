// rest_api/src/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use models::errors::ApiError;

/// HTTP-facing wrapper around [`ApiError`]. Handlers return
/// `Result<_, ApiFailure>` so `?` lifts store and security errors straight
/// into the response mapping below.
#[derive(Debug)]
pub struct ApiFailure(pub ApiError);

impl From<ApiError> for ApiFailure {
    fn from(err: ApiError) -> Self {
        ApiFailure(err)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ApiError::Validation(_)
            | ApiError::Conflict(_)
            | ApiError::Precondition(_)
            | ApiError::InvalidCodePayload => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ApiError::InvalidCredentials
            | ApiError::InvalidToken
            | ApiError::InvalidClient
            | ApiError::InvalidScope
            | ApiError::InvalidOrExpiredCode
            | ApiError::UnsupportedGrantType(_) => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "message": message,
        }));
        (status, body).into_response()
    }
}
