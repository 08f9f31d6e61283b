// rest_api/src/handlers/appointments.rs

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use models::medical::{Appointment, AppointmentCreate, AppointmentFilter, AppointmentPatch};

use crate::error::ApiFailure;
use crate::handlers::envelope;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AppointmentFilter>,
) -> Json<Vec<Appointment>> {
    Json(state.store.list_appointments(&filter).await)
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<AppointmentCreate>,
) -> Result<Response, ApiFailure> {
    let appointment = state.store.create_appointment(input).await?;
    state.store.persist().await?;
    Ok(envelope(StatusCode::CREATED, appointment))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiFailure> {
    let appointment = state.store.get_appointment(id).await?;
    Ok(envelope(StatusCode::OK, appointment))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<AppointmentPatch>,
) -> Result<Response, ApiFailure> {
    let appointment = state.store.update_appointment(id, patch).await?;
    state.store.persist().await?;
    Ok(envelope(StatusCode::OK, appointment))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    state.store.delete_appointment(id).await?;
    state.store.persist().await?;
    Ok(StatusCode::NO_CONTENT)
}
