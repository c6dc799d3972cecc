use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{PatientCreate, PatientRead, PatientUpdate};
use super::repository::PatientRepository;
use crate::auth::password;
use crate::doctor::repository::DoctorRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Patient business service. Create and update go through the doctor
/// repository to uphold the invariant that every patient references an
/// existing doctor.
pub struct PatientService<P: PatientRepository, D: DoctorRepository> {
    repo: Arc<P>,
    doctors: Arc<D>,
}

impl<P: PatientRepository, D: DoctorRepository> PatientService<P, D> {
    pub fn new(repo: Arc<P>, doctors: Arc<D>) -> Self {
        Self { repo, doctors }
    }

    pub async fn list(&self, params: Pagination) -> Result<Page<PatientRead>, ServiceError> {
        let (offset, limit) = params.normalize();
        let (data, total) = self.repo.list(offset, limit).await?;
        Ok(Page::new(params, total, data))
    }

    pub async fn get(&self, id: i32) -> Result<PatientRead, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Patient with id {id} does not exist")))
    }

    /// Fuzzy search over IIN and name parts; an empty result is a not-found.
    pub async fn search(&self, query: &str) -> Result<Vec<PatientRead>, ServiceError> {
        let found = self.repo.search(query).await?;
        if found.is_empty() {
            return Err(ServiceError::not_found("Patients not found"));
        }
        Ok(found)
    }

    #[instrument(skip(self, input), fields(iin = %input.iin, doctor_id = input.doctor_id))]
    pub async fn register(&self, input: PatientCreate) -> Result<PatientRead, ServiceError> {
        self.validate_create(&input).await?;

        let hash = password::hash_password(&input.password)
            .map_err(|e| ServiceError::Hash(e.to_string()))?;
        let created = self.repo.insert(&input, &hash).await?;
        info!(patient_id = created.id, "patient_registered");
        Ok(created)
    }

    /// Full replace; the password is re-hashed and the doctor re-checked.
    #[instrument(skip(self, input), fields(patient_id = id))]
    pub async fn update(&self, id: i32, input: PatientUpdate) -> Result<PatientRead, ServiceError> {
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
                    "Patient with IIN {} already exists",
                    input.iin
                )));
            }
        }
        self.ensure_doctor(input.doctor_id).await?;

        let hash = password::hash_password(&input.password)
            .map_err(|e| ServiceError::Hash(e.to_string()))?;
        self.repo.update(id, &input, &hash).await
    }

    #[instrument(skip(self), fields(patient_id = id))]
    pub async fn delete(&self, id: i32) -> Result<i32, ServiceError> {
        self.get(id).await?;
        self.repo.delete(id).await?;
        info!(patient_id = id, "patient_deleted");
        Ok(id)
    }

    async fn validate_create(&self, input: &PatientCreate) -> Result<(), ServiceError> {
        models::validate::iin(&input.iin)?;
        models::validate::person_name("first_name", &input.first_name)?;
        models::validate::person_name("last_name", &input.last_name)?;
        models::validate::person_name("middle_name", &input.middle_name)?;
        models::validate::age(input.age)?;
        password::validate_strength(&input.password)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        if self.repo.find_by_iin(&input.iin).await?.is_some() {
            return Err(ServiceError::conflict(format!(
                "Patient with IIN {} already exists",
                input.iin
            )));
        }
        self.ensure_doctor(input.doctor_id).await
    }

    async fn ensure_doctor(&self, doctor_id: i32) -> Result<(), ServiceError> {
        if self.doctors.find_by_id(doctor_id).await?.is_none() {
            return Err(ServiceError::not_found(format!(
                "Doctor with id {doctor_id} does not exist"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctor::domain::DoctorCreate;
    use crate::doctor::repository::mock::MockDoctorRepository;
    use crate::doctor::DoctorService;
    use crate::patient::repository::mock::MockPatientRepository;
    use models::enums::{Gender, Qualification};

    async fn service_with_doctor() -> (
        PatientService<MockPatientRepository, MockDoctorRepository>,
        i32,
    ) {
        let doctors = Arc::new(MockDoctorRepository::default());
        let doctor = DoctorService::new(doctors.clone())
            .register(DoctorCreate {
                first_name: "Aray".into(),
                last_name: "Bekova".into(),
                middle_name: "Serikovna".into(),
                iin: "770101300111".into(),
                password: "Passw0rd!".into(),
                gender: Gender::Female,
                age: 41,
                qualification: Qualification::Internists,
            })
            .await
            .unwrap();
        let svc = PatientService::new(Arc::new(MockPatientRepository::default()), doctors);
        (svc, doctor.id)
    }

    fn patient_input(iin: &str, doctor_id: i32) -> PatientCreate {
        PatientCreate {
            first_name: "Dana".into(),
            last_name: "Kim".into(),
            middle_name: "Olegovna".into(),
            iin: iin.into(),
            password: "Passw0rd!".into(),
            gender: Gender::Female,
            age: 29,
            doctor_id,
        }
    }

    #[tokio::test]
    async fn register_requires_existing_doctor() {
        let (svc, doctor_id) = service_with_doctor().await;
        let err = svc
            .register(patient_input("880101450987", doctor_id + 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let created = svc.register(patient_input("880101450987", doctor_id)).await.unwrap();
        assert_eq!(created.doctor_id, doctor_id);
    }

    #[tokio::test]
    async fn register_duplicate_iin_conflicts() {
        let (svc, doctor_id) = service_with_doctor().await;
        svc.register(patient_input("880101450987", doctor_id)).await.unwrap();
        let err = svc
            .register(patient_input("880101450987", doctor_id))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_replaces_whole_record() {
        let (svc, doctor_id) = service_with_doctor().await;
        let created = svc.register(patient_input("880101450987", doctor_id)).await.unwrap();

        let updated = svc
            .update(
                created.id,
                PatientUpdate {
                    first_name: "Aliya".into(),
                    last_name: "Kim".into(),
                    middle_name: "Olegovna".into(),
                    iin: "880101450987".into(),
                    password: "NewPassw0rd".into(),
                    gender: Gender::Female,
                    age: 30,
                    doctor_id,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Aliya");
        assert_eq!(updated.age, 30);
    }

    #[tokio::test]
    async fn missing_patient_is_not_found() {
        let (svc, _) = service_with_doctor().await;
        assert!(matches!(svc.get(42).await.unwrap_err(), ServiceError::NotFound(_)));
        assert!(matches!(svc.delete(42).await.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_envelope_matches_totals() {
        let (svc, doctor_id) = service_with_doctor().await;
        for i in 0..5 {
            svc.register(patient_input(&format!("88010145098{i}"), doctor_id))
                .await
                .unwrap();
        }
        let page = svc.list(Pagination { page: 2, page_size: 2 }).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 2);
    }
}
