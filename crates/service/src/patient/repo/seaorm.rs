use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use models::patient::{self, Column, Entity};

use crate::errors::ServiceError;
use crate::patient::domain::{PatientCreate, PatientRead, PatientUpdate};
use crate::patient::repository::PatientRepository;

pub struct SeaOrmPatientRepository {
    pub db: DatabaseConnection,
}

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

fn name_similarity(query: &str) -> SimpleExpr {
    Expr::cust_with_values(
        "similarity(concat_ws(' ', first_name, last_name, middle_name), $1)",
        [query.to_owned()],
    )
}

fn fuzzy_condition(words: &[String]) -> Condition {
    let mut cond = Condition::any();
    for word in words {
        let pat = format!("%{word}%");
        for col in [Column::Iin, Column::FirstName, Column::LastName, Column::MiddleName] {
            cond = cond.add(Expr::expr(Func::lower(Expr::col(col))).like(pat.clone()));
        }
    }
    cond
}

#[async_trait::async_trait]
impl PatientRepository for SeaOrmPatientRepository {
    async fn list(&self, offset: u64, limit: u64) -> Result<(Vec<PatientRead>, u64), ServiceError> {
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

    async fn find_by_id(&self, id: i32) -> Result<Option<PatientRead>, ServiceError> {
        let found = Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_by_iin(&self, iin: &str) -> Result<Option<PatientRead>, ServiceError> {
        let found = Entity::find()
            .filter(Column::Iin.eq(iin))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn search(&self, query: &str) -> Result<Vec<PatientRead>, ServiceError> {
        let words: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        if words.is_empty() {
            return Ok(Vec::new());
        }
        let rows = Entity::find()
            .filter(fuzzy_condition(&words))
            .order_by(name_similarity(&words.join(" ")), Order::Desc)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, data: &PatientCreate, hashed_password: &str) -> Result<PatientRead, ServiceError> {
        let am = patient::ActiveModel {
            first_name: Set(data.first_name.clone()),
            last_name: Set(data.last_name.clone()),
            middle_name: Set(data.middle_name.clone()),
            iin: Set(data.iin.clone()),
            hashed_password: Set(hashed_password.to_owned()),
            gender: Set(data.gender),
            age: Set(data.age),
            doctor_id: Set(data.doctor_id),
            ..Default::default()
        };
        let created = am.insert(&self.db).await.map_err(db_err)?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, data: &PatientUpdate, hashed_password: &str) -> Result<PatientRead, ServiceError> {
        let existing = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::not_found(format!("Patient with id {id} does not exist")))?;
        let mut am: patient::ActiveModel = existing.into();
        am.first_name = Set(data.first_name.clone());
        am.last_name = Set(data.last_name.clone());
        am.middle_name = Set(data.middle_name.clone());
        am.iin = Set(data.iin.clone());
        am.hashed_password = Set(hashed_password.to_owned());
        am.gender = Set(data.gender);
        am.age = Set(data.age);
        am.doctor_id = Set(data.doctor_id);
        let updated = am.update(&self.db).await.map_err(db_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
