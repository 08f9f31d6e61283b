// models/src/errors.rs

pub use thiserror::Error;

/// Failure taxonomy surfaced by the store, auth and token services.
///
/// The HTTP layer translates each variant to a status code; nothing below
/// it needs to know about HTTP. `Internal` carries detail for logging and
/// is never echoed verbatim to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("precondition failed: {0}")]
    Precondition(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("invalid client credentials")]
    InvalidClient,
    #[error("unsupported grant type: {0}")]
    UnsupportedGrantType(String),
    #[error("invalid token scope")]
    InvalidScope,
    #[error("authorization code carries no subject")]
    InvalidCodePayload,
    #[error("invalid or expired authorization code")]
    InvalidOrExpiredCode,
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Shorthand for the dangling-reference case, naming the entity the
    /// failed point lookup was for.
    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(entity.to_string())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn internal(msg: impl std::fmt::Display) -> Self {
        ApiError::Internal(msg.to_string())
    }
}
