// rest_api/src/extract.rs

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use models::errors::ApiError;
use models::medical::User;

use crate::error::ApiFailure;
use crate::state::AppState;

/// Bearer-token extractor. Pulls the `Authorization` header, verifies the
/// access token and resolves it to the stored user; any failure along the
/// way responds 401.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiFailure;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiFailure(ApiError::InvalidToken))?;
        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or(ApiFailure(ApiError::InvalidToken))?;
        let user = state.auth.current_user(token).await?;
        Ok(CurrentUser(user))
    }
}
