// store/src/departments.rs

use uuid::Uuid;

use models::errors::{ApiError, ApiResult};
use models::medical::{Department, DepartmentCreate, DepartmentFilter, DepartmentPatch};

use crate::Datastore;

impl Datastore {
    pub async fn list_departments(&self, filter: &DepartmentFilter) -> Vec<Department> {
        let tables = self.read().await;
        tables
            .departments
            .values()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect()
    }

    pub async fn create_department(&self, input: DepartmentCreate) -> ApiResult<Department> {
        let mut tables = self.write().await;
        if tables.departments.values().any(|d| d.name == input.name) {
            return Err(ApiError::conflict("department name must be unique"));
        }
        let department = input.into_department(Uuid::new_v4());
        tables.departments.insert(department.id, department.clone());
        Ok(department)
    }

    pub async fn get_department(&self, id: Uuid) -> ApiResult<Department> {
        let tables = self.read().await;
        tables
            .departments
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("department"))
    }

    pub async fn update_department(
        &self,
        id: Uuid,
        patch: DepartmentPatch,
    ) -> ApiResult<Department> {
        let mut tables = self.write().await;
        let current = tables
            .departments
            .get(&id)
            .ok_or_else(|| ApiError::not_found("department"))?;

        let mut updated = current.clone();
        patch.apply(&mut updated);
        if updated.name != current.name
            && tables.departments.values().any(|d| d.name == updated.name)
        {
            return Err(ApiError::conflict("department name must be unique"));
        }
        tables.departments.insert(id, updated.clone());
        Ok(updated)
    }

    pub async fn delete_department(&self, id: Uuid) -> ApiResult<()> {
        let mut tables = self.write().await;
        if !tables.departments.contains_key(&id) {
            return Err(ApiError::not_found("department"));
        }
        let referenced = tables.doctors.values().any(|d| d.department_id == id)
            || tables.appointments.values().any(|a| a.department_id == id);
        if referenced {
            return Err(ApiError::conflict(
                "cannot delete department with associated doctors or appointments",
            ));
        }
        tables.departments.remove(&id);
        Ok(())
    }

    /// First department in storage order; used as the default assignment
    /// for doctor registrations that do not name one.
    pub async fn first_department_id(&self) -> Option<Uuid> {
        let tables = self.read().await;
        tables.departments.keys().next().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cardiology() -> DepartmentCreate {
        DepartmentCreate {
            name: "Cardiology".into(),
            description: Some("Heart".into()),
        }
    }

    #[tokio::test]
    async fn duplicate_name_conflicts_and_keeps_both_rows_unchanged() {
        let store = Datastore::new();
        let first = store.create_department(cardiology()).await.unwrap();

        let err = store.create_department(cardiology()).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let all = store.list_departments(&Default::default()).await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], first);
    }

    #[tokio::test]
    async fn rename_onto_existing_name_conflicts() {
        let store = Datastore::new();
        store.create_department(cardiology()).await.unwrap();
        let other = store
            .create_department(DepartmentCreate {
                name: "Oncology".into(),
                description: None,
            })
            .await
            .unwrap();

        let patch: DepartmentPatch = serde_json::from_str(r#"{"name": "Cardiology"}"#).unwrap();
        let err = store.update_department(other.id, patch).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(store.get_department(other.id).await.unwrap().name, "Oncology");
    }

    #[tokio::test]
    async fn get_and_delete_missing_department_not_found() {
        let store = Datastore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.get_department(id).await, Err(ApiError::NotFound(_))));
        assert!(matches!(store.delete_department(id).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn name_filter_is_substring() {
        let store = Datastore::new();
        store.create_department(cardiology()).await.unwrap();
        let filter: DepartmentFilter = serde_json::from_str(r#"{"name": "cardio"}"#).unwrap();
        assert_eq!(store.list_departments(&filter).await.len(), 1);
        let filter: DepartmentFilter = serde_json::from_str(r#"{"name": "derm"}"#).unwrap();
        assert!(store.list_departments(&filter).await.is_empty());
    }
}
