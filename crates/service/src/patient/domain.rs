use models::enums::Gender;
use serde::{Deserialize, Serialize};

/// Read view; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRead {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub iin: String,
    pub gender: Gender,
    pub age: i32,
    pub doctor_id: i32,
}

impl From<models::patient::Model> for PatientRead {
    fn from(m: models::patient::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            middle_name: m.middle_name,
            iin: m.iin,
            gender: m.gender,
            age: m.age,
            doctor_id: m.doctor_id,
        }
    }
}

/// Registration payload; the raw password is hashed before storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCreate {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub iin: String,
    pub password: String,
    pub gender: Gender,
    pub age: i32,
    pub doctor_id: i32,
}

/// Full-replace update payload; the password is re-hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientUpdate {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub iin: String,
    pub password: String,
    pub gender: Gender,
    pub age: i32,
    pub doctor_id: i32,
}
