// rest_api/src/handlers/doctors.rs

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use models::medical::{DoctorCreate, DoctorFilter, DoctorPatch, DoctorProfile};

use crate::error::ApiFailure;
use crate::handlers::envelope;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<DoctorFilter>,
) -> Json<Vec<DoctorProfile>> {
    Json(state.store.list_doctors(&filter).await)
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<DoctorCreate>,
) -> Result<Response, ApiFailure> {
    let doctor = state.store.create_doctor(input).await?;
    state.store.persist().await?;
    Ok(envelope(StatusCode::CREATED, doctor))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiFailure> {
    let doctor = state.store.get_doctor(id).await?;
    Ok(envelope(StatusCode::OK, doctor))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DoctorPatch>,
) -> Result<Response, ApiFailure> {
    let doctor = state.store.update_doctor(id, patch).await?;
    state.store.persist().await?;
    Ok(envelope(StatusCode::OK, doctor))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    state.store.delete_doctor(id).await?;
    state.store.persist().await?;
    Ok(StatusCode::NO_CONTENT)
}
