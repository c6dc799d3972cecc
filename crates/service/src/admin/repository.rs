use async_trait::async_trait;

use super::domain::{AdminCreate, AdminRead, AdminUpdate};
use crate::errors::ServiceError;

/// Repository abstraction for admin persistence.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn list(&self, offset: u64, limit: u64) -> Result<(Vec<AdminRead>, u64), ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<AdminRead>, ServiceError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminRead>, ServiceError>;
    async fn insert(&self, data: &AdminCreate, hashed_password: &str) -> Result<AdminRead, ServiceError>;
    async fn update(&self, id: i32, data: &AdminUpdate, hashed_password: &str) -> Result<AdminRead, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// In-memory mock for unit tests.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAdminRepository {
        rows: Mutex<Vec<AdminRead>>,
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl AdminRepository for MockAdminRepository {
        async fn list(&self, offset: u64, limit: u64) -> Result<(Vec<AdminRead>, u64), ServiceError> {
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

        async fn find_by_id(&self, id: i32) -> Result<Option<AdminRead>, ServiceError> {
            Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<AdminRead>, ServiceError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.username == username)
                .cloned())
        }

        async fn insert(&self, data: &AdminCreate, _hashed_password: &str) -> Result<AdminRead, ServiceError> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let created = AdminRead {
                id: *next,
                first_name: data.first_name.clone(),
                last_name: data.last_name.clone(),
                middle_name: data.middle_name.clone(),
                username: data.username.clone(),
            };
            self.rows.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: i32, data: &AdminUpdate, _hashed_password: &str) -> Result<AdminRead, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| ServiceError::not_found(format!("Admin with id {id} does not exist")))?;
            row.first_name = data.first_name.clone();
            row.last_name = data.last_name.clone();
            row.middle_name = data.middle_name.clone();
            row.username = data.username.clone();
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.rows.lock().unwrap().retain(|a| a.id != id);
            Ok(())
        }
    }
}
