// store/src/lib.rs
//! In-process entity store for the hospital backend.
//!
//! All tables live behind one `RwLock`; every mutating operation validates
//! its input completely (uniqueness, foreign keys, restrict-on-delete)
//! before touching a table, so a failed write never leaves a partial state
//! behind. Reads run concurrently; writes serialize on the lock. An
//! optional snapshot path persists the tables as JSON across restarts.

mod appointments;
mod departments;
mod doctors;
mod emrs;
mod integrity;
mod patients;
#[cfg(test)]
pub(crate) mod testutil;
mod users;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use models::errors::{ApiError, ApiResult};
use models::medical::{Appointment, Department, DoctorProfile, Emr, PatientProfile, User};

/// Backing tables. `BTreeMap` keeps listing order stable across runs
/// (storage order, per the list contract — insertion order is not
/// preserved).
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Tables {
    pub(crate) users: BTreeMap<Uuid, User>,
    pub(crate) patients: BTreeMap<Uuid, PatientProfile>,
    pub(crate) doctors: BTreeMap<Uuid, DoctorProfile>,
    pub(crate) departments: BTreeMap<Uuid, Department>,
    pub(crate) appointments: BTreeMap<Uuid, Appointment>,
    pub(crate) emrs: BTreeMap<Uuid, Emr>,
}

/// Shared handle to the entity store. Cheap to clone; constructed once at
/// startup and injected into every service that needs it.
#[derive(Debug, Clone)]
pub struct Datastore {
    inner: Arc<RwLock<Tables>>,
    path: Option<PathBuf>,
}

impl Default for Datastore {
    fn default() -> Self {
        Self::new()
    }
}

impl Datastore {
    /// Fresh, empty store with no persistence.
    pub fn new() -> Self {
        Datastore {
            inner: Arc::new(RwLock::new(Tables::default())),
            path: None,
        }
    }

    /// Opens a store backed by a JSON snapshot file. An existing snapshot
    /// is loaded; a missing one means starting empty.
    pub fn open(path: PathBuf) -> ApiResult<Self> {
        let tables = if path.exists() {
            let raw = std::fs::read(&path)
                .map_err(|e| ApiError::internal(format!("reading snapshot: {e}")))?;
            serde_json::from_slice(&raw)
                .map_err(|e| ApiError::internal(format!("decoding snapshot: {e}")))?
        } else {
            Tables::default()
        };
        Ok(Datastore {
            inner: Arc::new(RwLock::new(tables)),
            path: Some(path),
        })
    }

    /// Writes the current tables to the snapshot path, if one is set.
    pub async fn persist(&self) -> ApiResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let tables = self.inner.read().await;
        let raw = serde_json::to_vec_pretty(&*tables)
            .map_err(|e| ApiError::internal(format!("encoding snapshot: {e}")))?;
        std::fs::write(path, raw)
            .map_err(|e| ApiError::internal(format!("writing snapshot: {e}")))
    }

    pub(crate) async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, Tables> {
        self.inner.read().await
    }

    pub(crate) async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, Tables> {
        self.inner.write().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::medical::DepartmentCreate;

    #[tokio::test]
    async fn snapshot_round_trips_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hospital.json");

        let store = Datastore::open(path.clone()).unwrap();
        let dept = store
            .create_department(DepartmentCreate {
                name: "Cardiology".into(),
                description: Some("Heart".into()),
            })
            .await
            .unwrap();
        store.persist().await.unwrap();

        let reopened = Datastore::open(path).unwrap();
        let fetched = reopened.get_department(dept.id).await.unwrap();
        assert_eq!(fetched, dept);
    }

    #[tokio::test]
    async fn missing_snapshot_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Datastore::open(dir.path().join("absent.json")).unwrap();
        assert!(store
            .list_departments(&Default::default())
            .await
            .is_empty());
    }
}
