// store/src/integrity.rs
//! Referential-integrity point lookups. Every check runs against the same
//! locked view of the tables as the write that follows it, so a reference
//! that passes here cannot dangle by commit time.

use uuid::Uuid;

use models::errors::{ApiError, ApiResult};

use crate::Tables;

pub(crate) fn require_user(tables: &Tables, id: Uuid) -> ApiResult<()> {
    if tables.users.contains_key(&id) {
        Ok(())
    } else {
        Err(ApiError::not_found("user"))
    }
}

pub(crate) fn require_patient(tables: &Tables, id: Uuid) -> ApiResult<()> {
    if tables.patients.contains_key(&id) {
        Ok(())
    } else {
        Err(ApiError::not_found("patient"))
    }
}

pub(crate) fn require_doctor(tables: &Tables, id: Uuid) -> ApiResult<()> {
    if tables.doctors.contains_key(&id) {
        Ok(())
    } else {
        Err(ApiError::not_found("doctor"))
    }
}

pub(crate) fn require_department(tables: &Tables, id: Uuid) -> ApiResult<()> {
    if tables.departments.contains_key(&id) {
        Ok(())
    } else {
        Err(ApiError::not_found("department"))
    }
}

pub(crate) fn require_appointment(tables: &Tables, id: Uuid) -> ApiResult<()> {
    if tables.appointments.contains_key(&id) {
        Ok(())
    } else {
        Err(ApiError::not_found("appointment"))
    }
}

/// One role-specific profile per user, across both profile tables.
pub(crate) fn require_no_profile(tables: &Tables, user_id: Uuid) -> ApiResult<()> {
    let taken = tables.patients.values().any(|p| p.user_id == user_id)
        || tables.doctors.values().any(|d| d.user_id == user_id);
    if taken {
        Err(ApiError::conflict("user already has a profile"))
    } else {
        Ok(())
    }
}
