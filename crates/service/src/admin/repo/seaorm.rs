use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use models::admin::{self, Column, Entity};

use crate::admin::domain::{AdminCreate, AdminRead, AdminUpdate};
use crate::admin::repository::AdminRepository;
use crate::errors::ServiceError;

pub struct SeaOrmAdminRepository {
    pub db: DatabaseConnection,
}

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[async_trait::async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn list(&self, offset: u64, limit: u64) -> Result<(Vec<AdminRead>, u64), ServiceError> {
        let total = Entity::find().count(&self.db).await.map_err(db_err)?;
        let rows = Entity::find()
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<AdminRead>, ServiceError> {
        let found = Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminRead>, ServiceError> {
        let found = Entity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, data: &AdminCreate, hashed_password: &str) -> Result<AdminRead, ServiceError> {
        let am = admin::ActiveModel {
            first_name: Set(data.first_name.clone()),
            last_name: Set(data.last_name.clone()),
            middle_name: Set(data.middle_name.clone()),
            username: Set(data.username.clone()),
            hashed_password: Set(hashed_password.to_owned()),
            ..Default::default()
        };
        let created = am.insert(&self.db).await.map_err(db_err)?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, data: &AdminUpdate, hashed_password: &str) -> Result<AdminRead, ServiceError> {
        let existing = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::not_found(format!("Admin with id {id} does not exist")))?;
        let mut am: admin::ActiveModel = existing.into();
        am.first_name = Set(data.first_name.clone());
        am.last_name = Set(data.last_name.clone());
        am.middle_name = Set(data.middle_name.clone());
        am.username = Set(data.username.clone());
        am.hashed_password = Set(hashed_password.to_owned());
        let updated = am.update(&self.db).await.map_err(db_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
