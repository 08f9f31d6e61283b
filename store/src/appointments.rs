// store/src/appointments.rs

use chrono::Utc;
use uuid::Uuid;

use models::errors::{ApiError, ApiResult};
use models::medical::{
    Appointment, AppointmentCreate, AppointmentFilter, AppointmentPatch, AppointmentStatus,
};

use crate::{integrity, Datastore};

impl Datastore {
    pub async fn list_appointments(&self, filter: &AppointmentFilter) -> Vec<Appointment> {
        let tables = self.read().await;
        tables
            .appointments
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect()
    }

    pub async fn create_appointment(&self, input: AppointmentCreate) -> ApiResult<Appointment> {
        let mut tables = self.write().await;
        integrity::require_patient(&tables, input.patient_id)?;
        integrity::require_department(&tables, input.department_id)?;
        if let Some(doctor_id) = input.doctor_id {
            integrity::require_doctor(&tables, doctor_id)?;
        }
        let appointment = input.into_appointment(Uuid::new_v4(), Utc::now())?;
        tables
            .appointments
            .insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    pub async fn get_appointment(&self, id: Uuid) -> ApiResult<Appointment> {
        let tables = self.read().await;
        tables
            .appointments
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("appointment"))
    }

    pub async fn update_appointment(
        &self,
        id: Uuid,
        patch: AppointmentPatch,
    ) -> ApiResult<Appointment> {
        let mut tables = self.write().await;
        let current = tables
            .appointments
            .get(&id)
            .ok_or_else(|| ApiError::not_found("appointment"))?;

        if let Some(patient_id) = patch.patient_id {
            integrity::require_patient(&tables, patient_id)?;
        }
        if let Some(department_id) = patch.department_id {
            integrity::require_department(&tables, department_id)?;
        }
        if let Some(Some(doctor_id)) = patch.doctor_id {
            integrity::require_doctor(&tables, doctor_id)?;
        }

        let mut updated = current.clone();
        patch.apply(&mut updated, Utc::now())?;
        tables.appointments.insert(id, updated.clone());
        Ok(updated)
    }

    /// Deletion is refused for fulfilled appointments and for appointments
    /// that already carry a medical record.
    pub async fn delete_appointment(&self, id: Uuid) -> ApiResult<()> {
        let mut tables = self.write().await;
        let appointment = tables
            .appointments
            .get(&id)
            .ok_or_else(|| ApiError::not_found("appointment"))?;
        if appointment.status == AppointmentStatus::Fulfilled {
            return Err(ApiError::conflict("cannot delete a fulfilled appointment"));
        }
        if tables.emrs.values().any(|e| e.appointment_id == id) {
            return Err(ApiError::conflict(
                "cannot delete appointment with an associated medical record",
            ));
        }
        tables.appointments.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{seed_appointment, seed_department, seed_doctor, seed_patient};

    #[tokio::test]
    async fn dangling_doctor_aborts_creation_entirely() {
        let store = Datastore::new();
        let dept = seed_department(&store, "Cardiology").await;
        let patient = seed_patient(&store, "ana").await;

        let err = store
            .create_appointment(AppointmentCreate {
                patient_id: patient.id,
                department_id: dept.id,
                doctor_id: Some(Uuid::new_v4()),
                start_time: Utc::now(),
                end_time: None,
                status: None,
                reason: None,
                notes: None,
                patient_instruction: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::not_found("doctor"));
        assert!(store.list_appointments(&Default::default()).await.is_empty());
    }

    #[tokio::test]
    async fn department_with_appointments_cannot_be_deleted() {
        let store = Datastore::new();
        let dept = seed_department(&store, "Cardiology").await;
        let patient = seed_patient(&store, "ana").await;
        seed_appointment(&store, patient.id, dept.id, None).await;

        let err = store.delete_department(dept.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert!(store.get_department(dept.id).await.is_ok());
    }

    #[tokio::test]
    async fn fulfilled_appointments_are_not_deletable() {
        let store = Datastore::new();
        let dept = seed_department(&store, "Cardiology").await;
        let patient = seed_patient(&store, "ana").await;
        let appt = seed_appointment(&store, patient.id, dept.id, None).await;

        let patch: AppointmentPatch =
            serde_json::from_str(r#"{"status": "fulfilled"}"#).unwrap();
        store.update_appointment(appt.id, patch).await.unwrap();

        let err = store.delete_appointment(appt.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert!(store.get_appointment(appt.id).await.is_ok());
    }

    #[tokio::test]
    async fn doctor_assignment_and_unassignment() {
        let store = Datastore::new();
        let dept = seed_department(&store, "Cardiology").await;
        let patient = seed_patient(&store, "ana").await;
        let doctor = seed_doctor(&store, "drb", dept.id).await;
        let appt = seed_appointment(&store, patient.id, dept.id, None).await;

        let assign: AppointmentPatch =
            serde_json::from_str(&format!(r#"{{"doctor_id": "{}"}}"#, doctor.id)).unwrap();
        let updated = store.update_appointment(appt.id, assign).await.unwrap();
        assert_eq!(updated.doctor_id, Some(doctor.id));
        assert!(updated.updated_at >= appt.updated_at);

        let unassign: AppointmentPatch = serde_json::from_str(r#"{"doctor_id": null}"#).unwrap();
        let updated = store.update_appointment(appt.id, unassign).await.unwrap();
        assert_eq!(updated.doctor_id, None);
    }

    #[tokio::test]
    async fn status_filter_narrows_the_list() {
        let store = Datastore::new();
        let dept = seed_department(&store, "Cardiology").await;
        let patient = seed_patient(&store, "ana").await;
        let appt = seed_appointment(&store, patient.id, dept.id, None).await;
        seed_appointment(&store, patient.id, dept.id, None).await;

        let cancel: AppointmentPatch = serde_json::from_str(r#"{"status": "cancelled"}"#).unwrap();
        store.update_appointment(appt.id, cancel).await.unwrap();

        let filter = AppointmentFilter {
            status: Some(AppointmentStatus::Cancelled),
            ..AppointmentFilter::default()
        };
        let listed = store.list_appointments(&filter).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, appt.id);
    }
}
