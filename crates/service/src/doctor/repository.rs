use async_trait::async_trait;

use super::domain::{DoctorCreate, DoctorRead, DoctorUpdate};
use crate::errors::ServiceError;
use crate::patient::domain::PatientRead;

/// Repository abstraction for doctor persistence. `list` and `patients_of`
/// return the page slice together with the unfiltered total.
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn list(&self, offset: u64, limit: u64) -> Result<(Vec<DoctorRead>, u64), ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<DoctorRead>, ServiceError>;
    async fn find_by_iin(&self, iin: &str) -> Result<Option<DoctorRead>, ServiceError>;
    /// Fuzzy match over IIN and name parts, best match first.
    async fn search(&self, query: &str) -> Result<Vec<DoctorRead>, ServiceError>;
    async fn insert(&self, data: &DoctorCreate, hashed_password: &str) -> Result<DoctorRead, ServiceError>;
    async fn update(&self, id: i32, data: &DoctorUpdate, hashed_password: &str) -> Result<DoctorRead, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    async fn patients_of(&self, doctor_id: i32, offset: u64, limit: u64) -> Result<(Vec<PatientRead>, u64), ServiceError>;
    async fn patient_count(&self, doctor_id: i32) -> Result<u64, ServiceError>;
}

/// In-memory mock for unit tests. Search matches substrings without
/// similarity ordering.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockDoctorRepository {
        rows: Mutex<Vec<DoctorRead>>,
        patients: Mutex<Vec<PatientRead>>,
        next_id: Mutex<i32>,
    }

    impl MockDoctorRepository {
        pub fn with_patient(&self, patient: PatientRead) {
            self.patients.lock().unwrap().push(patient);
        }

        pub fn remove_patients_of(&self, doctor_id: i32) {
            self.patients.lock().unwrap().retain(|p| p.doctor_id != doctor_id);
        }
    }

    fn matches(d: &DoctorRead, query: &str) -> bool {
        let q = query.to_lowercase();
        q.split_whitespace().any(|w| {
            d.iin.to_lowercase().contains(w)
                || d.first_name.to_lowercase().contains(w)
                || d.last_name.to_lowercase().contains(w)
                || d.middle_name.to_lowercase().contains(w)
        })
    }

    #[async_trait]
    impl DoctorRepository for MockDoctorRepository {
        async fn list(&self, offset: u64, limit: u64) -> Result<(Vec<DoctorRead>, u64), ServiceError> {
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

        async fn find_by_id(&self, id: i32) -> Result<Option<DoctorRead>, ServiceError> {
            Ok(self.rows.lock().unwrap().iter().find(|d| d.id == id).cloned())
        }

        async fn find_by_iin(&self, iin: &str) -> Result<Option<DoctorRead>, ServiceError> {
            Ok(self.rows.lock().unwrap().iter().find(|d| d.iin == iin).cloned())
        }

        async fn search(&self, query: &str) -> Result<Vec<DoctorRead>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|d| matches(d, query)).cloned().collect())
        }

        async fn insert(&self, data: &DoctorCreate, _hashed_password: &str) -> Result<DoctorRead, ServiceError> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let created = DoctorRead {
                id: *next,
                first_name: data.first_name.clone(),
                last_name: data.last_name.clone(),
                middle_name: data.middle_name.clone(),
                iin: data.iin.clone(),
                gender: data.gender,
                age: data.age,
                qualification: data.qualification,
            };
            self.rows.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: i32, data: &DoctorUpdate, _hashed_password: &str) -> Result<DoctorRead, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| ServiceError::not_found(format!("Doctor with id {id} does not exist")))?;
            row.first_name = data.first_name.clone();
            row.last_name = data.last_name.clone();
            row.middle_name = data.middle_name.clone();
            row.iin = data.iin.clone();
            row.gender = data.gender;
            row.age = data.age;
            row.qualification = data.qualification;
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.rows.lock().unwrap().retain(|d| d.id != id);
            Ok(())
        }

        async fn patients_of(&self, doctor_id: i32, offset: u64, limit: u64) -> Result<(Vec<PatientRead>, u64), ServiceError> {
            let patients = self.patients.lock().unwrap();
            let of_doctor: Vec<PatientRead> = patients
                .iter()
                .filter(|p| p.doctor_id == doctor_id)
                .cloned()
                .collect();
            let total = of_doctor.len() as u64;
            let page = of_doctor
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect();
            Ok((page, total))
        }

        async fn patient_count(&self, doctor_id: i32) -> Result<u64, ServiceError> {
            let patients = self.patients.lock().unwrap();
            Ok(patients.iter().filter(|p| p.doctor_id == doctor_id).count() as u64)
        }
    }
}
