// rest_api/src/handlers/chatbot.rs

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use models::errors::ApiError;
use models::medical::{AppointmentCreate, DepartmentFilter, Role};

use crate::error::ApiFailure;
use crate::extract::CurrentUser;
use crate::handlers::envelope;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatbotBooking {
    pub department_id: Uuid,
    pub start_time: DateTime<Utc>,
}

/// Books a default-length slot for the authenticated patient. The chatbot
/// only supplies a department and a start time; everything else takes the
/// appointment defaults.
pub async fn book_appointment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(booking): Json<ChatbotBooking>,
) -> Result<Response, ApiFailure> {
    if user.role != Role::Patient {
        return Err(ApiError::validation("only patients can book through the chatbot").into());
    }
    let patient = state
        .store
        .find_patient_by_user_id(user.id)
        .await
        .ok_or_else(|| ApiError::not_found("patient"))?;

    let appointment = state
        .store
        .create_appointment(AppointmentCreate {
            patient_id: patient.id,
            department_id: booking.department_id,
            doctor_id: None,
            start_time: booking.start_time,
            end_time: None,
            status: None,
            reason: None,
            notes: None,
            patient_instruction: None,
        })
        .await?;
    state.store.persist().await?;
    tracing::info!(appointment_id = %appointment.id, patient_id = %patient.id, "chatbot booked appointment");
    Ok(envelope(StatusCode::CREATED, appointment))
}

pub async fn departments(State(state): State<AppState>) -> Response {
    let departments = state.store.list_departments(&DepartmentFilter::default()).await;
    envelope(StatusCode::OK, departments)
}
