// store/src/testutil.rs
//! Seed helpers shared by the per-entity test modules.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use models::medical::{
    Appointment, AppointmentCreate, Department, DepartmentCreate, DoctorCreate, DoctorProfile,
    PatientCreate, PatientProfile, Role, User,
};

use crate::Datastore;

pub(crate) async fn seed_user(store: &Datastore, username: &str, role: Role) -> User {
    let user = User {
        id: Uuid::new_v4(),
        username: username.into(),
        hashed_password: "hash".into(),
        role,
    };
    let mut tables = store.write().await;
    tables.users.insert(user.id, user.clone());
    user
}

pub(crate) fn patient_input(user_id: Uuid) -> PatientCreate {
    PatientCreate {
        user_id,
        full_name: "Nguyen Van A".into(),
        gender: "male".into(),
        dob: NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
        phone: "0901000000".into(),
        address: "1 Main St".into(),
    }
}

pub(crate) fn doctor_input(user_id: Uuid, department_id: Uuid) -> DoctorCreate {
    DoctorCreate {
        user_id,
        full_name: "Dr Tran B".into(),
        gender: "female".into(),
        dob: NaiveDate::from_ymd_opt(1980, 7, 2).unwrap(),
        phone: "0902000000".into(),
        address: "2 Clinic Rd".into(),
        department_id,
    }
}

pub(crate) async fn seed_department(store: &Datastore, name: &str) -> Department {
    store
        .create_department(DepartmentCreate {
            name: name.into(),
            description: None,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_patient(store: &Datastore, username: &str) -> PatientProfile {
    let user = seed_user(store, username, Role::Patient).await;
    store.create_patient(patient_input(user.id)).await.unwrap()
}

pub(crate) async fn seed_doctor(
    store: &Datastore,
    username: &str,
    department_id: Uuid,
) -> DoctorProfile {
    let user = seed_user(store, username, Role::Doctor).await;
    store
        .create_doctor(doctor_input(user.id, department_id))
        .await
        .unwrap()
}

pub(crate) async fn seed_appointment(
    store: &Datastore,
    patient_id: Uuid,
    department_id: Uuid,
    doctor_id: Option<Uuid>,
) -> Appointment {
    store
        .create_appointment(AppointmentCreate {
            patient_id,
            department_id,
            doctor_id,
            start_time: Utc::now(),
            end_time: None,
            status: None,
            reason: Some("checkup".into()),
            notes: None,
            patient_instruction: None,
        })
        .await
        .unwrap()
}
