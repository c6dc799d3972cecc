use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::auth::domain::{Credentials, Role};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_credentials(
        &self,
        role: Role,
        username: &str,
    ) -> Result<Option<Credentials>, AuthError> {
        let found = match role {
            Role::Patient => models::patient::Entity::find()
                .filter(models::patient::Column::Iin.eq(username))
                .one(&self.db)
                .await
                .map_err(|e| AuthError::Repository(e.to_string()))?
                .map(|p| Credentials { subject: p.iin, password_hash: p.hashed_password }),
            Role::Doctor => models::doctor::Entity::find()
                .filter(models::doctor::Column::Iin.eq(username))
                .one(&self.db)
                .await
                .map_err(|e| AuthError::Repository(e.to_string()))?
                .map(|d| Credentials { subject: d.iin, password_hash: d.hashed_password }),
            Role::Admin => models::admin::Entity::find()
                .filter(models::admin::Column::Username.eq(username))
                .one(&self.db)
                .await
                .map_err(|e| AuthError::Repository(e.to_string()))?
                .map(|a| Credentials { subject: a.username, password_hash: a.hashed_password }),
        };
        Ok(found)
    }
}
