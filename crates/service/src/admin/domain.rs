use serde::{Deserialize, Serialize};

/// Read view; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRead {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub username: String,
}

impl From<models::admin::Model> for AdminRead {
    fn from(m: models::admin::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            middle_name: m.middle_name,
            username: m.username,
        }
    }
}

/// Registration payload; the raw password is hashed before storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreate {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub username: String,
    pub password: String,
}

/// Full-replace update payload; the password is re-hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUpdate {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub username: String,
    pub password: String,
}
