use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::{Gender, Qualification};
use crate::patient;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "doctor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    #[sea_orm(unique)]
    pub iin: String,
    pub hashed_password: String,
    pub gender: Gender,
    pub age: i32,
    pub qualification: Qualification,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Patient,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Patient => Entity::has_many(patient::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
