// store/src/doctors.rs

use uuid::Uuid;

use models::errors::{ApiError, ApiResult};
use models::medical::{DoctorCreate, DoctorFilter, DoctorPatch, DoctorProfile};

use crate::{integrity, Datastore};

impl Datastore {
    pub async fn list_doctors(&self, filter: &DoctorFilter) -> Vec<DoctorProfile> {
        let tables = self.read().await;
        tables
            .doctors
            .values()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect()
    }

    pub async fn create_doctor(&self, input: DoctorCreate) -> ApiResult<DoctorProfile> {
        let mut tables = self.write().await;
        integrity::require_user(&tables, input.user_id)?;
        integrity::require_no_profile(&tables, input.user_id)?;
        integrity::require_department(&tables, input.department_id)?;
        let profile = input.into_profile(Uuid::new_v4());
        tables.doctors.insert(profile.id, profile.clone());
        Ok(profile)
    }

    pub async fn get_doctor(&self, id: Uuid) -> ApiResult<DoctorProfile> {
        let tables = self.read().await;
        tables
            .doctors
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("doctor"))
    }

    pub async fn find_doctor_by_user_id(&self, user_id: Uuid) -> Option<DoctorProfile> {
        let tables = self.read().await;
        tables
            .doctors
            .values()
            .find(|d| d.user_id == user_id)
            .cloned()
    }

    pub async fn update_doctor(&self, id: Uuid, patch: DoctorPatch) -> ApiResult<DoctorProfile> {
        let mut tables = self.write().await;
        let current = tables
            .doctors
            .get(&id)
            .ok_or_else(|| ApiError::not_found("doctor"))?;
        if let Some(department_id) = patch.department_id {
            integrity::require_department(&tables, department_id)?;
        }
        let mut updated = current.clone();
        patch.apply(&mut updated);
        tables.doctors.insert(id, updated.clone());
        Ok(updated)
    }

    pub async fn delete_doctor(&self, id: Uuid) -> ApiResult<()> {
        let mut tables = self.write().await;
        if !tables.doctors.contains_key(&id) {
            return Err(ApiError::not_found("doctor"));
        }
        let referenced = tables
            .appointments
            .values()
            .any(|a| a.doctor_id == Some(id))
            || tables.emrs.values().any(|e| e.doctor_id == id);
        if referenced {
            return Err(ApiError::conflict(
                "cannot delete doctor with associated appointments or medical records",
            ));
        }
        tables.doctors.remove(&id);
        Ok(())
    }
}
