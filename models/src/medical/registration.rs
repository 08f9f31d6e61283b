// models/src/medical/registration.rs

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::doctor::DoctorProfile;
use super::patient::PatientProfile;
use super::user::Role;

/// Registration input. Username, password and role are required; the
/// profile fields are optional and fall back to placeholders so a bare
/// OAuth2-style form still registers.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Doctor registrations only; defaults to the first department in
    /// storage order when omitted.
    pub department_id: Option<Uuid>,
}

impl Registration {
    pub fn full_name_or_default(&self) -> String {
        self.full_name.clone().unwrap_or_else(|| self.username.clone())
    }

    pub fn gender_or_default(&self) -> String {
        self.gender.clone().unwrap_or_else(|| "unspecified".to_string())
    }

    pub fn dob_or_default(&self) -> NaiveDate {
        self.dob
            .or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn phone_or_default(&self) -> String {
        self.phone.clone().unwrap_or_default()
    }

    pub fn address_or_default(&self) -> String {
        self.address.clone().unwrap_or_default()
    }
}

/// Tagged role-specific profile provisioned atomically with the user row.
/// Admin accounts carry no profile.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleProfile {
    Patient(PatientProfile),
    Doctor(DoctorProfile),
    Admin,
}
