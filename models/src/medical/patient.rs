// models/src/medical/patient.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::contains_ci;

/// Patient profile, one-to-one with a `User` account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub gender: String,
    pub dob: NaiveDate,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientCreate {
    pub user_id: Uuid,
    pub full_name: String,
    pub gender: String,
    pub dob: NaiveDate,
    pub phone: String,
    pub address: String,
}

impl PatientCreate {
    pub fn into_profile(self, id: Uuid) -> PatientProfile {
        PatientProfile {
            id,
            user_id: self.user_id,
            full_name: self.full_name,
            gender: self.gender,
            dob: self.dob,
            phone: self.phone,
            address: self.address,
        }
    }
}

/// Partial update. Absent fields leave the row untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientPatch {
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl PatientPatch {
    pub fn apply(&self, profile: &mut PatientProfile) {
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
    }
}

/// Conjunctive list filter; `full_name` is a substring match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientFilter {
    pub user_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
}

impl PatientFilter {
    pub fn matches(&self, profile: &PatientProfile) -> bool {
        self.user_id.is_none_or(|id| profile.user_id == id)
            && self
                .full_name
                .as_deref()
                .is_none_or(|name| contains_ci(&profile.full_name, name))
            && self.gender.as_deref().is_none_or(|g| profile.gender == g)
            && self.phone.as_deref().is_none_or(|p| profile.phone == p)
    }
}
