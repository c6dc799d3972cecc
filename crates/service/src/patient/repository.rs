use async_trait::async_trait;

use super::domain::{PatientCreate, PatientRead, PatientUpdate};
use crate::errors::ServiceError;

/// Repository abstraction for patient persistence.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn list(&self, offset: u64, limit: u64) -> Result<(Vec<PatientRead>, u64), ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<PatientRead>, ServiceError>;
    async fn find_by_iin(&self, iin: &str) -> Result<Option<PatientRead>, ServiceError>;
    /// Fuzzy match over IIN and name parts, best match first.
    async fn search(&self, query: &str) -> Result<Vec<PatientRead>, ServiceError>;
    async fn insert(&self, data: &PatientCreate, hashed_password: &str) -> Result<PatientRead, ServiceError>;
    async fn update(&self, id: i32, data: &PatientUpdate, hashed_password: &str) -> Result<PatientRead, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// In-memory mock for unit tests.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockPatientRepository {
        rows: Mutex<Vec<PatientRead>>,
        next_id: Mutex<i32>,
    }

    fn matches(p: &PatientRead, query: &str) -> bool {
        let q = query.to_lowercase();
        q.split_whitespace().any(|w| {
            p.iin.to_lowercase().contains(w)
                || p.first_name.to_lowercase().contains(w)
                || p.last_name.to_lowercase().contains(w)
                || p.middle_name.to_lowercase().contains(w)
        })
    }

    #[async_trait]
    impl PatientRepository for MockPatientRepository {
        async fn list(&self, offset: u64, limit: u64) -> Result<(Vec<PatientRead>, u64), ServiceError> {
            let rows = self.rows.lock().unwrap();
            let total = rows.len() as u64;
            let page = rows
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect();
            Ok((page, total))
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<PatientRead>, ServiceError> {
            Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn find_by_iin(&self, iin: &str) -> Result<Option<PatientRead>, ServiceError> {
            Ok(self.rows.lock().unwrap().iter().find(|p| p.iin == iin).cloned())
        }

        async fn search(&self, query: &str) -> Result<Vec<PatientRead>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|p| matches(p, query)).cloned().collect())
        }

        async fn insert(&self, data: &PatientCreate, _hashed_password: &str) -> Result<PatientRead, ServiceError> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let created = PatientRead {
                id: *next,
                first_name: data.first_name.clone(),
                last_name: data.last_name.clone(),
                middle_name: data.middle_name.clone(),
                iin: data.iin.clone(),
                gender: data.gender,
                age: data.age,
                doctor_id: data.doctor_id,
            };
            self.rows.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: i32, data: &PatientUpdate, _hashed_password: &str) -> Result<PatientRead, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| ServiceError::not_found(format!("Patient with id {id} does not exist")))?;
            row.first_name = data.first_name.clone();
            row.last_name = data.last_name.clone();
            row.middle_name = data.middle_name.clone();
            row.iin = data.iin.clone();
            row.gender = data.gender;
            row.age = data.age;
            row.doctor_id = data.doctor_id;
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.rows.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }
    }
}
