// store/src/patients.rs

use uuid::Uuid;

use models::errors::{ApiError, ApiResult};
use models::medical::{PatientCreate, PatientFilter, PatientPatch, PatientProfile};

use crate::{integrity, Datastore};

impl Datastore {
    pub async fn list_patients(&self, filter: &PatientFilter) -> Vec<PatientProfile> {
        let tables = self.read().await;
        tables
            .patients
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub async fn create_patient(&self, input: PatientCreate) -> ApiResult<PatientProfile> {
        let mut tables = self.write().await;
        integrity::require_user(&tables, input.user_id)?;
        integrity::require_no_profile(&tables, input.user_id)?;
        let profile = input.into_profile(Uuid::new_v4());
        tables.patients.insert(profile.id, profile.clone());
        Ok(profile)
    }

    pub async fn get_patient(&self, id: Uuid) -> ApiResult<PatientProfile> {
        let tables = self.read().await;
        tables
            .patients
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("patient"))
    }

    pub async fn find_patient_by_user_id(&self, user_id: Uuid) -> Option<PatientProfile> {
        let tables = self.read().await;
        tables
            .patients
            .values()
            .find(|p| p.user_id == user_id)
            .cloned()
    }

    pub async fn update_patient(&self, id: Uuid, patch: PatientPatch) -> ApiResult<PatientProfile> {
        let mut tables = self.write().await;
        let current = tables
            .patients
            .get(&id)
            .ok_or_else(|| ApiError::not_found("patient"))?;
        let mut updated = current.clone();
        patch.apply(&mut updated);
        tables.patients.insert(id, updated.clone());
        Ok(updated)
    }

    pub async fn delete_patient(&self, id: Uuid) -> ApiResult<()> {
        let mut tables = self.write().await;
        if !tables.patients.contains_key(&id) {
            return Err(ApiError::not_found("patient"));
        }
        let referenced = tables.appointments.values().any(|a| a.patient_id == id)
            || tables.emrs.values().any(|e| e.patient_id == id);
        if referenced {
            return Err(ApiError::conflict(
                "cannot delete patient with associated appointments or medical records",
            ));
        }
        tables.patients.remove(&id);
        Ok(())
    }
}
