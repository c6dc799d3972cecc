use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{AdminCreate, AdminRead, AdminUpdate};
use super::repository::AdminRepository;
use crate::auth::password;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Admin business service: username uniqueness and password hashing.
pub struct AdminService<R: AdminRepository> {
    repo: Arc<R>,
}

impl<R: AdminRepository> AdminService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, params: Pagination) -> Result<Page<AdminRead>, ServiceError> {
        let (offset, limit) = params.normalize();
        let (data, total) = self.repo.list(offset, limit).await?;
        Ok(Page::new(params, total, data))
    }

    pub async fn get(&self, id: i32) -> Result<AdminRead, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Admin with id {id} does not exist")))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<AdminRead, ServiceError> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("Admin not found"))
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: AdminCreate) -> Result<AdminRead, ServiceError> {
        models::validate::username(&input.username)?;
        models::validate::person_name("first_name", &input.first_name)?;
        models::validate::person_name("last_name", &input.last_name)?;
        models::validate::person_name("middle_name", &input.middle_name)?;
        password::validate_strength(&input.password)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(ServiceError::conflict(format!(
                "Admin with username {} already exists",
                input.username
            )));
        }

        let hash = password::hash_password(&input.password)
            .map_err(|e| ServiceError::Hash(e.to_string()))?;
        let created = self.repo.insert(&input, &hash).await?;
        info!(admin_id = created.id, "admin_registered");
        Ok(created)
    }

    /// Full replace; the password is re-hashed.
    #[instrument(skip(self, input), fields(admin_id = id))]
    pub async fn update(&self, id: i32, input: AdminUpdate) -> Result<AdminRead, ServiceError> {
        models::validate::username(&input.username)?;
        models::validate::person_name("first_name", &input.first_name)?;
        models::validate::person_name("last_name", &input.last_name)?;
        models::validate::person_name("middle_name", &input.middle_name)?;
        password::validate_strength(&input.password)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        self.get(id).await?;
        if let Some(other) = self.repo.find_by_username(&input.username).await? {
            if other.id != id {
                return Err(ServiceError::conflict(format!(
                    "Admin with username {} already exists",
                    input.username
                )));
            }
        }

        let hash = password::hash_password(&input.password)
            .map_err(|e| ServiceError::Hash(e.to_string()))?;
        self.repo.update(id, &input, &hash).await
    }

    #[instrument(skip(self), fields(admin_id = id))]
    pub async fn delete(&self, id: i32) -> Result<i32, ServiceError> {
        self.get(id).await?;
        self.repo.delete(id).await?;
        info!(admin_id = id, "admin_deleted");
        Ok(id)
    }
}
