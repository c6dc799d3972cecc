use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{DoctorCreate, DoctorRead, DoctorUpdate};
use super::repository::DoctorRepository;
use crate::auth::password;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::patient::domain::PatientRead;

/// Doctor business service: uniqueness checks, password hashing, and the
/// referential guard on delete.
pub struct DoctorService<R: DoctorRepository> {
    repo: Arc<R>,
}

impl<R: DoctorRepository> DoctorService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, params: Pagination) -> Result<Page<DoctorRead>, ServiceError> {
        let (offset, limit) = params.normalize();
        let (data, total) = self.repo.list(offset, limit).await?;
        Ok(Page::new(params, total, data))
    }

    pub async fn get(&self, id: i32) -> Result<DoctorRead, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Doctor with id {id} does not exist")))
    }

    pub async fn get_by_iin(&self, iin: &str) -> Result<DoctorRead, ServiceError> {
        self.repo
            .find_by_iin(iin)
            .await?
            .ok_or_else(|| ServiceError::not_found("Doctor not found"))
    }

    /// Fuzzy search over IIN and name parts; an empty result is a not-found.
    pub async fn search(&self, query: &str) -> Result<Vec<DoctorRead>, ServiceError> {
        let found = self.repo.search(query).await?;
        if found.is_empty() {
            return Err(ServiceError::not_found("Doctors not found"));
        }
        Ok(found)
    }

    #[instrument(skip(self, input), fields(iin = %input.iin))]
    pub async fn register(&self, input: DoctorCreate) -> Result<DoctorRead, ServiceError> {
        models::validate::iin(&input.iin)?;
        models::validate::person_name("first_name", &input.first_name)?;
        models::validate::person_name("last_name", &input.last_name)?;
        models::validate::person_name("middle_name", &input.middle_name)?;
        models::validate::age(input.age)?;
        password::validate_strength(&input.password)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        if self.repo.find_by_iin(&input.iin).await?.is_some() {
            return Err(ServiceError::conflict(format!(
                "Doctor with IIN {} already exists",
                input.iin
            )));
        }

        let hash = password::hash_password(&input.password)
            .map_err(|e| ServiceError::Hash(e.to_string()))?;
        let created = self.repo.insert(&input, &hash).await?;
        info!(doctor_id = created.id, "doctor_registered");
        Ok(created)
    }

    /// Full replace; the password is re-hashed.
    #[instrument(skip(self, input), fields(doctor_id = id))]
    pub async fn update(&self, id: i32, input: DoctorUpdate) -> Result<DoctorRead, ServiceError> {
        models::validate::iin(&input.iin)?;
        models::validate::person_name("first_name", &input.first_name)?;
        models::validate::person_name("last_name", &input.last_name)?;
        models::validate::person_name("middle_name", &input.middle_name)?;
        models::validate::age(input.age)?;
        password::validate_strength(&input.password)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        self.get(id).await?;
        if let Some(other) = self.repo.find_by_iin(&input.iin).await? {
            if other.id != id {
                return Err(ServiceError::conflict(format!(
                    "Doctor with IIN {} already exists",
                    input.iin
                )));
            }
        }

        let hash = password::hash_password(&input.password)
            .map_err(|e| ServiceError::Hash(e.to_string()))?;
        self.repo.update(id, &input, &hash).await
    }

    /// Refused while patients still reference the doctor.
    #[instrument(skip(self), fields(doctor_id = id))]
    pub async fn delete(&self, id: i32) -> Result<i32, ServiceError> {
        self.get(id).await?;
        let assigned = self.repo.patient_count(id).await?;
        if assigned > 0 {
            return Err(ServiceError::conflict(format!(
                "Doctor with id {id} still has {assigned} assigned patients"
            )));
        }
        self.repo.delete(id).await?;
        info!(doctor_id = id, "doctor_deleted");
        Ok(id)
    }

    pub async fn patients(&self, id: i32, params: Pagination) -> Result<Page<PatientRead>, ServiceError> {
        self.get(id).await?;
        let (offset, limit) = params.normalize();
        let (data, total) = self.repo.patients_of(id, offset, limit).await?;
        Ok(Page::new(params, total, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctor::repository::mock::MockDoctorRepository;
    use models::enums::{Gender, Qualification};

    fn doctor_input(iin: &str) -> DoctorCreate {
        DoctorCreate {
            first_name: "Aray".into(),
            last_name: "Bekova".into(),
            middle_name: "Serikovna".into(),
            iin: iin.into(),
            password: "Passw0rd!".into(),
            gender: Gender::Female,
            age: 41,
            qualification: Qualification::Pediatrician,
        }
    }

    fn update_of(create: &DoctorCreate) -> DoctorUpdate {
        DoctorUpdate {
            first_name: create.first_name.clone(),
            last_name: create.last_name.clone(),
            middle_name: create.middle_name.clone(),
            iin: create.iin.clone(),
            password: create.password.clone(),
            gender: create.gender,
            age: create.age,
            qualification: create.qualification,
        }
    }

    fn patient_of(doctor_id: i32, id: i32, iin: &str) -> PatientRead {
        PatientRead {
            id,
            first_name: "Dana".into(),
            last_name: "Kim".into(),
            middle_name: "Olegovna".into(),
            iin: iin.into(),
            gender: Gender::Female,
            age: 30,
            doctor_id,
        }
    }

    fn service() -> (DoctorService<MockDoctorRepository>, Arc<MockDoctorRepository>) {
        let repo = Arc::new(MockDoctorRepository::default());
        (DoctorService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn register_and_get() {
        let (svc, _) = service();
        let created = svc.register(doctor_input("990101350123")).await.unwrap();
        assert!(created.id > 0);
        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched.iin, "990101350123");
    }

    #[tokio::test]
    async fn register_duplicate_iin_conflicts() {
        let (svc, _) = service();
        svc.register(doctor_input("990101350123")).await.unwrap();
        let err = svc.register(doctor_input("990101350123")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_rejects_bad_iin_and_age() {
        let (svc, _) = service();
        let bad_iin = doctor_input("12345");
        assert!(matches!(
            svc.register(bad_iin).await.unwrap_err(),
            ServiceError::Model(_)
        ));

        let mut bad_age = doctor_input("990101350123");
        bad_age.age = 130;
        assert!(matches!(
            svc.register(bad_age).await.unwrap_err(),
            ServiceError::Model(_)
        ));
    }

    #[tokio::test]
    async fn update_iin_collision_conflicts() {
        let (svc, _) = service();
        let a = svc.register(doctor_input("990101350123")).await.unwrap();
        svc.register(doctor_input("880101450987")).await.unwrap();

        let input = update_of(&doctor_input("880101450987"));
        let err = svc.update(a.id, input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_blocked_while_patients_assigned() {
        let (svc, repo) = service();
        let d = svc.register(doctor_input("990101350123")).await.unwrap();
        repo.with_patient(patient_of(d.id, 1, "880101450987"));

        let err = svc.delete(d.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        repo.remove_patients_of(d.id);
        assert_eq!(svc.delete(d.id).await.unwrap(), d.id);
        assert!(matches!(svc.get(d.id).await.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_misses_are_not_found() {
        let (svc, _) = service();
        svc.register(doctor_input("990101350123")).await.unwrap();
        assert!(svc.search("Bekova").await.unwrap().len() == 1);
        assert!(matches!(
            svc.search("nobody").await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn patients_listing_is_paginated() {
        let (svc, repo) = service();
        let d = svc.register(doctor_input("990101350123")).await.unwrap();
        for i in 0..3 {
            repo.with_patient(patient_of(d.id, i + 1, &format!("00010145098{i}")));
        }

        let page = svc
            .patients(d.id, Pagination { page: 1, page_size: 2 })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data.len(), 2);
    }
}
