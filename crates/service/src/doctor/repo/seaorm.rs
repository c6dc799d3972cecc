use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use models::doctor::{self, Column, Entity};
use models::patient;

use crate::doctor::domain::{DoctorCreate, DoctorRead, DoctorUpdate};
use crate::doctor::repository::DoctorRepository;
use crate::errors::ServiceError;
use crate::patient::domain::PatientRead;

pub struct SeaOrmDoctorRepository {
    pub db: DatabaseConnection,
}

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

/// pg_trgm similarity over the concatenated name, used to rank search hits.
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
impl DoctorRepository for SeaOrmDoctorRepository {
    async fn list(&self, offset: u64, limit: u64) -> Result<(Vec<DoctorRead>, u64), ServiceError> {
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

    async fn find_by_id(&self, id: i32) -> Result<Option<DoctorRead>, ServiceError> {
        let found = Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_by_iin(&self, iin: &str) -> Result<Option<DoctorRead>, ServiceError> {
        let found = Entity::find()
            .filter(Column::Iin.eq(iin))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn search(&self, query: &str) -> Result<Vec<DoctorRead>, ServiceError> {
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

    async fn insert(&self, data: &DoctorCreate, hashed_password: &str) -> Result<DoctorRead, ServiceError> {
        let am = doctor::ActiveModel {
            first_name: Set(data.first_name.clone()),
            last_name: Set(data.last_name.clone()),
            middle_name: Set(data.middle_name.clone()),
            iin: Set(data.iin.clone()),
            hashed_password: Set(hashed_password.to_owned()),
            gender: Set(data.gender),
            age: Set(data.age),
            qualification: Set(data.qualification),
            ..Default::default()
        };
        let created = am.insert(&self.db).await.map_err(db_err)?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, data: &DoctorUpdate, hashed_password: &str) -> Result<DoctorRead, ServiceError> {
        let existing = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::not_found(format!("Doctor with id {id} does not exist")))?;
        let mut am: doctor::ActiveModel = existing.into();
        am.first_name = Set(data.first_name.clone());
        am.last_name = Set(data.last_name.clone());
        am.middle_name = Set(data.middle_name.clone());
        am.iin = Set(data.iin.clone());
        am.hashed_password = Set(hashed_password.to_owned());
        am.gender = Set(data.gender);
        am.age = Set(data.age);
        am.qualification = Set(data.qualification);
        let updated = am.update(&self.db).await.map_err(db_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn patients_of(&self, doctor_id: i32, offset: u64, limit: u64) -> Result<(Vec<PatientRead>, u64), ServiceError> {
        let query = patient::Entity::find().filter(patient::Column::DoctorId.eq(doctor_id));
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let rows = query
            .order_by_asc(patient::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn patient_count(&self, doctor_id: i32) -> Result<u64, ServiceError> {
        patient::Entity::find()
            .filter(patient::Column::DoctorId.eq(doctor_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
