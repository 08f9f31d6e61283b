// rest_api/src/handlers/mod.rs

pub mod appointments;
pub mod auth;
pub mod chatbot;
pub mod departments;
pub mod doctors;
pub mod emrs;
pub mod patients;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// Standard success envelope for single-entity responses. Lists return a
/// bare array and deletes return 204 with no body, so neither uses this.
pub(crate) fn envelope<T: Serialize>(status: StatusCode, data: T) -> Response {
    let body = Json(json!({
        "data": data,
        "status": status.as_u16(),
    }));
    (status, body).into_response()
}
