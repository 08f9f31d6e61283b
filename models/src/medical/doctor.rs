// models/src/medical/doctor.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::contains_ci;

/// Doctor profile, one-to-one with a `User` account and many-to-one with a
/// `Department`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub gender: String,
    pub dob: NaiveDate,
    pub phone: String,
    pub address: String,
    pub department_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorCreate {
    pub user_id: Uuid,
    pub full_name: String,
    pub gender: String,
    pub dob: NaiveDate,
    pub phone: String,
    pub address: String,
    pub department_id: Uuid,
}

impl DoctorCreate {
    pub fn into_profile(self, id: Uuid) -> DoctorProfile {
        DoctorProfile {
            id,
            user_id: self.user_id,
            full_name: self.full_name,
            gender: self.gender,
            dob: self.dob,
            phone: self.phone,
            address: self.address,
            department_id: self.department_id,
        }
    }
}

/// Partial update. Absent fields leave the row untouched; `department_id`
/// is validated against the department table before the merge is applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorPatch {
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department_id: Option<Uuid>,
}

impl DoctorPatch {
    pub fn apply(&self, profile: &mut DoctorProfile) {
        if let Some(full_name) = &self.full_name {
            profile.full_name = full_name.clone();
        }
        if let Some(gender) = &self.gender {
            profile.gender = gender.clone();
        }
        if let Some(dob) = self.dob {
            profile.dob = dob;
        }
        if let Some(phone) = &self.phone {
            profile.phone = phone.clone();
        }
        if let Some(address) = &self.address {
            profile.address = address.clone();
        }
        if let Some(department_id) = self.department_id {
            profile.department_id = department_id;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorFilter {
    pub user_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub department_id: Option<Uuid>,
}

impl DoctorFilter {
    pub fn matches(&self, profile: &DoctorProfile) -> bool {
        self.user_id.is_none_or(|id| profile.user_id == id)
            && self
                .full_name
                .as_deref()
                .is_none_or(|name| contains_ci(&profile.full_name, name))
            && self.gender.as_deref().is_none_or(|g| profile.gender == g)
            && self
                .department_id
                .is_none_or(|id| profile.department_id == id)
    }
}
