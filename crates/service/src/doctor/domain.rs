use models::enums::{Gender, Qualification};
use serde::{Deserialize, Serialize};

/// Read view; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRead {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub iin: String,
    pub gender: Gender,
    pub age: i32,
    pub qualification: Qualification,
}

impl From<models::doctor::Model> for DoctorRead {
    fn from(m: models::doctor::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            middle_name: m.middle_name,
            iin: m.iin,
            gender: m.gender,
            age: m.age,
            qualification: m.qualification,
        }
    }
}

/// Registration payload; the raw password is hashed before storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorCreate {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub iin: String,
    pub password: String,
    pub gender: Gender,
    pub age: i32,
    pub qualification: Qualification,
}

/// Full-replace update payload; the password is re-hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorUpdate {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub iin: String,
    pub password: String,
    pub gender: Gender,
    pub age: i32,
    pub qualification: Qualification,
}
