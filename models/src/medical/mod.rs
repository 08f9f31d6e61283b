// models/src/medical/mod.rs

pub mod appointment;
pub mod department;
pub mod doctor;
pub mod emr;
pub mod patient;
pub mod registration;
pub mod user;

pub use appointment::{Appointment, AppointmentCreate, AppointmentFilter, AppointmentPatch, AppointmentStatus};
pub use department::{Department, DepartmentCreate, DepartmentFilter, DepartmentPatch};
pub use doctor::{DoctorCreate, DoctorFilter, DoctorPatch, DoctorProfile};
pub use emr::{Emr, EmrCreate, EmrFilter, EmrPatch};
pub use patient::{PatientCreate, PatientFilter, PatientPatch, PatientProfile};
pub use registration::{Registration, RoleProfile};
pub use user::{Role, User, UserDto};

use serde::{Deserialize, Deserializer};

/// Deserializes a doubly-optional patch field so that an absent key stays
/// `None` (leave the column untouched) while an explicit `null` becomes
/// `Some(None)` (clear the column). Plain `Option<Option<T>>` folds both
/// cases into `None`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Case-insensitive substring match used by the list filters.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
