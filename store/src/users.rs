// store/src/users.rs

use uuid::Uuid;

use models::errors::{ApiError, ApiResult};
use models::medical::{RoleProfile, User};

use crate::{integrity, Datastore};

impl Datastore {
    pub async fn find_user_by_username(&self, username: &str) -> Option<User> {
        let tables = self.read().await;
        tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    pub async fn find_user_by_id(&self, id: Uuid) -> Option<User> {
        let tables = self.read().await;
        tables.users.get(&id).cloned()
    }

    /// Inserts the user row and its role-specific profile in one critical
    /// section. Uniqueness and foreign keys are re-checked under the write
    /// lock, so either both rows land or neither does.
    pub async fn create_user_with_profile(
        &self,
        user: User,
        profile: RoleProfile,
    ) -> ApiResult<User> {
        let mut tables = self.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(ApiError::conflict("username already taken"));
        }
        match &profile {
            RoleProfile::Patient(p) => {
                if p.user_id != user.id {
                    return Err(ApiError::validation("profile user_id mismatch"));
                }
                integrity::require_no_profile(&tables, user.id)?;
            }
            RoleProfile::Doctor(d) => {
                if d.user_id != user.id {
                    return Err(ApiError::validation("profile user_id mismatch"));
                }
                integrity::require_no_profile(&tables, user.id)?;
                integrity::require_department(&tables, d.department_id)?;
            }
            RoleProfile::Admin => {}
        }

        tables.users.insert(user.id, user.clone());
        match profile {
            RoleProfile::Patient(p) => {
                tables.patients.insert(p.id, p);
            }
            RoleProfile::Doctor(d) => {
                tables.doctors.insert(d.id, d);
            }
            RoleProfile::Admin => {}
        }
        Ok(user)
    }
}
