// store/src/emrs.rs

use chrono::Utc;
use uuid::Uuid;

use models::errors::{ApiError, ApiResult};
use models::medical::{Emr, EmrCreate, EmrFilter, EmrPatch};

use crate::{integrity, Datastore};

impl Datastore {
    pub async fn list_emrs(&self, filter: &EmrFilter) -> Vec<Emr> {
        let tables = self.read().await;
        tables
            .emrs
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    pub async fn create_emr(&self, input: EmrCreate) -> ApiResult<Emr> {
        let mut tables = self.write().await;
        integrity::require_appointment(&tables, input.appointment_id)?;
        integrity::require_patient(&tables, input.patient_id)?;
        integrity::require_doctor(&tables, input.doctor_id)?;
        if tables
            .emrs
            .values()
            .any(|e| e.appointment_id == input.appointment_id)
        {
            return Err(ApiError::conflict(
                "appointment already has a medical record",
            ));
        }
        let emr = input.into_emr(Uuid::new_v4(), Utc::now())?;
        tables.emrs.insert(emr.id, emr.clone());
        Ok(emr)
    }

    pub async fn get_emr(&self, id: Uuid) -> ApiResult<Emr> {
        let tables = self.read().await;
        tables
            .emrs
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("medical record"))
    }

    pub async fn update_emr(&self, id: Uuid, patch: EmrPatch) -> ApiResult<Emr> {
        let mut tables = self.write().await;
        let current = tables
            .emrs
            .get(&id)
            .ok_or_else(|| ApiError::not_found("medical record"))?;
        let mut updated = current.clone();
        patch.apply(&mut updated)?;
        tables.emrs.insert(id, updated.clone());
        Ok(updated)
    }

    pub async fn delete_emr(&self, id: Uuid) -> ApiResult<()> {
        let mut tables = self.write().await;
        if tables.emrs.remove(&id).is_none() {
            return Err(ApiError::not_found("medical record"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{seed_appointment, seed_department, seed_doctor, seed_patient};
    use serde_json::json;

    async fn seeded(store: &Datastore) -> EmrCreate {
        let dept = seed_department(store, "Cardiology").await;
        let patient = seed_patient(store, "ana").await;
        let doctor = seed_doctor(store, "drb", dept.id).await;
        let appt = seed_appointment(store, patient.id, dept.id, Some(doctor.id)).await;
        EmrCreate {
            subjective_notes: Some("chest pain".into()),
            objective_notes: Some(json!({"bp": "120/80"})),
            assessment: "stable angina".into(),
            plan: Some("stress test".into()),
            prescription: Some(json!({"aspirin": "75mg"})),
            appointment_id: appt.id,
            patient_id: patient.id,
            doctor_id: doctor.id,
        }
    }

    #[tokio::test]
    async fn dangling_appointment_creates_nothing() {
        let store = Datastore::new();
        let mut input = seeded(&store).await;
        input.appointment_id = Uuid::new_v4();

        let err = store.create_emr(input).await.unwrap_err();
        assert_eq!(err, ApiError::not_found("appointment"));
        assert!(store.list_emrs(&Default::default()).await.is_empty());
    }

    #[tokio::test]
    async fn one_emr_per_appointment() {
        let store = Datastore::new();
        let input = seeded(&store).await;
        store.create_emr(input.clone()).await.unwrap();

        let err = store.create_emr(input).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(store.list_emrs(&Default::default()).await.len(), 1);
    }

    #[tokio::test]
    async fn patch_updates_clinical_fields_only_when_present() {
        let store = Datastore::new();
        let created = store.create_emr(seeded(&store).await).await.unwrap();

        let patch: EmrPatch =
            serde_json::from_str(r#"{"assessment": "unstable angina"}"#).unwrap();
        let updated = store.update_emr(created.id, patch).await.unwrap();
        assert_eq!(updated.assessment, "unstable angina");
        assert_eq!(updated.plan, created.plan);
        assert_eq!(updated.prescription, created.prescription);
    }

    #[tokio::test]
    async fn filter_by_patient() {
        let store = Datastore::new();
        let input = seeded(&store).await;
        let patient_id = input.patient_id;
        store.create_emr(input).await.unwrap();

        let filter = EmrFilter {
            patient_id: Some(patient_id),
            ..EmrFilter::default()
        };
        assert_eq!(store.list_emrs(&filter).await.len(), 1);
        let filter = EmrFilter {
            patient_id: Some(Uuid::new_v4()),
            ..EmrFilter::default()
        };
        assert!(store.list_emrs(&filter).await.is_empty());
    }
}
