// rest_api/src/handlers/patients.rs

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use models::medical::{PatientCreate, PatientFilter, PatientPatch, PatientProfile};

use crate::error::ApiFailure;
use crate::handlers::envelope;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<PatientFilter>,
) -> Json<Vec<PatientProfile>> {
    Json(state.store.list_patients(&filter).await)
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<PatientCreate>,
) -> Result<Response, ApiFailure> {
    let patient = state.store.create_patient(input).await?;
    state.store.persist().await?;
    Ok(envelope(StatusCode::CREATED, patient))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiFailure> {
    let patient = state.store.get_patient(id).await?;
    Ok(envelope(StatusCode::OK, patient))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PatientPatch>,
) -> Result<Response, ApiFailure> {
    let patient = state.store.update_patient(id, patch).await?;
    state.store.persist().await?;
    Ok(envelope(StatusCode::OK, patient))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    state.store.delete_patient(id).await?;
    state.store.persist().await?;
    Ok(StatusCode::NO_CONTENT)
}
