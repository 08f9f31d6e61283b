// models/src/medical/appointment.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::double_option;
use crate::errors::{ApiError, ApiResult};

/// Default appointment length when the caller supplies only a start time
/// (the chatbot flow books slots this way).
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Booked,
    Fulfilled,
    Cancelled,
    Noshow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub status: AppointmentStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub patient_id: Uuid,
    pub doctor_id: Option<Uuid>,
    pub department_id: Uuid,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub patient_instruction: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentCreate {
    pub patient_id: Uuid,
    pub department_id: Uuid,
    pub doctor_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub patient_instruction: Option<String>,
}

impl AppointmentCreate {
    /// Builds the row, filling the default slot length and status. Fails
    /// `Validation` when the supplied end time does not follow the start.
    pub fn into_appointment(self, id: Uuid, now: DateTime<Utc>) -> ApiResult<Appointment> {
        let end_time = self
            .end_time
            .unwrap_or(self.start_time + Duration::minutes(DEFAULT_SLOT_MINUTES));
        if end_time <= self.start_time {
            return Err(ApiError::validation("end_time must be after start_time"));
        }
        Ok(Appointment {
            id,
            status: self.status.unwrap_or(AppointmentStatus::Booked),
            start_time: self.start_time,
            end_time,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            department_id: self.department_id,
            reason: self.reason,
            notes: self.notes,
            patient_instruction: self.patient_instruction,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update. `doctor_id` and the free-text columns are nullable, so
/// they keep the absent/null distinction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentPatch {
    pub status: Option<AppointmentStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub patient_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    pub doctor_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub reason: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub patient_instruction: Option<Option<String>>,
}

impl AppointmentPatch {
    /// Merges the patch, stamping `updated_at`. Fails `Validation` when the
    /// merged times are out of order.
    pub fn apply(&self, appointment: &mut Appointment, now: DateTime<Utc>) -> ApiResult<()> {
        if let Some(status) = self.status {
            appointment.status = status;
        }
        if let Some(start_time) = self.start_time {
            appointment.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            appointment.end_time = end_time;
        }
        if appointment.end_time <= appointment.start_time {
            return Err(ApiError::validation("end_time must be after start_time"));
        }
        if let Some(patient_id) = self.patient_id {
            appointment.patient_id = patient_id;
        }
        if let Some(department_id) = self.department_id {
            appointment.department_id = department_id;
        }
        if let Some(doctor_id) = self.doctor_id {
            appointment.doctor_id = doctor_id;
        }
        if let Some(reason) = &self.reason {
            appointment.reason = reason.clone();
        }
        if let Some(notes) = &self.notes {
            appointment.notes = notes.clone();
        }
        if let Some(patient_instruction) = &self.patient_instruction {
            appointment.patient_instruction = patient_instruction.clone();
        }
        appointment.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.status.is_none_or(|s| appointment.status == s)
            && self.patient_id.is_none_or(|id| appointment.patient_id == id)
            && self.doctor_id.is_none_or(|id| appointment.doctor_id == Some(id))
            && self
                .department_id
                .is_none_or(|id| appointment.department_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> AppointmentCreate {
        AppointmentCreate {
            patient_id: Uuid::new_v4(),
            department_id: Uuid::new_v4(),
            doctor_id: None,
            start_time: Utc::now(),
            end_time: None,
            status: None,
            reason: Some("checkup".into()),
            notes: None,
            patient_instruction: None,
        }
    }

    #[test]
    fn defaults_fill_slot_and_status() {
        let input = create();
        let start = input.start_time;
        let appt = input.into_appointment(Uuid::new_v4(), Utc::now()).unwrap();
        assert_eq!(appt.status, AppointmentStatus::Booked);
        assert_eq!(appt.end_time - start, Duration::minutes(DEFAULT_SLOT_MINUTES));
    }

    #[test]
    fn inverted_times_are_rejected() {
        let mut input = create();
        input.end_time = Some(input.start_time - Duration::minutes(5));
        let err = input.into_appointment(Uuid::new_v4(), Utc::now()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn null_doctor_unassigns_while_absent_keeps() {
        let doctor = Uuid::new_v4();
        let mut appt = create()
            .into_appointment(Uuid::new_v4(), Utc::now())
            .unwrap();
        appt.doctor_id = Some(doctor);

        let keep: AppointmentPatch = serde_json::from_str(r#"{"notes": "bring reports"}"#).unwrap();
        keep.apply(&mut appt, Utc::now()).unwrap();
        assert_eq!(appt.doctor_id, Some(doctor));

        let clear: AppointmentPatch = serde_json::from_str(r#"{"doctor_id": null}"#).unwrap();
        clear.apply(&mut appt, Utc::now()).unwrap();
        assert_eq!(appt.doctor_id, None);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Noshow).unwrap(),
            r#""noshow""#
        );
    }
}
