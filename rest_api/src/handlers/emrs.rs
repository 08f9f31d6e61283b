// rest_api/src/handlers/emrs.rs

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use models::medical::{Emr, EmrCreate, EmrFilter, EmrPatch};

use crate::error::ApiFailure;
use crate::handlers::envelope;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<EmrFilter>,
) -> Json<Vec<Emr>> {
    Json(state.store.list_emrs(&filter).await)
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<EmrCreate>,
) -> Result<Response, ApiFailure> {
    let emr = state.store.create_emr(input).await?;
    state.store.persist().await?;
    Ok(envelope(StatusCode::CREATED, emr))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiFailure> {
    let emr = state.store.get_emr(id).await?;
    Ok(envelope(StatusCode::OK, emr))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<EmrPatch>,
) -> Result<Response, ApiFailure> {
    let emr = state.store.update_emr(id, patch).await?;
    state.store.persist().await?;
    Ok(envelope(StatusCode::OK, emr))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    state.store.delete_emr(id).await?;
    state.store.persist().await?;
    Ok(StatusCode::NO_CONTENT)
}
