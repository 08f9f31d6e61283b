// rest_api/src/handlers/departments.rs

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use models::medical::{Department, DepartmentCreate, DepartmentFilter, DepartmentPatch};

use crate::error::ApiFailure;
use crate::handlers::envelope;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<DepartmentFilter>,
) -> Json<Vec<Department>> {
    Json(state.store.list_departments(&filter).await)
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<DepartmentCreate>,
) -> Result<Response, ApiFailure> {
    let department = state.store.create_department(input).await?;
    state.store.persist().await?;
    Ok(envelope(StatusCode::CREATED, department))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiFailure> {
    let department = state.store.get_department(id).await?;
    Ok(envelope(StatusCode::OK, department))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DepartmentPatch>,
) -> Result<Response, ApiFailure> {
    let department = state.store.update_department(id, patch).await?;
    state.store.persist().await?;
    Ok(envelope(StatusCode::OK, department))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    state.store.delete_department(id).await?;
    state.store.persist().await?;
    Ok(StatusCode::NO_CONTENT)
}
