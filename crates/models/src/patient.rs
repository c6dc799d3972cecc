use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::doctor;
use crate::enums::Gender;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "patient")]
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
    pub doctor_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Doctor,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Doctor => Entity::belongs_to(doctor::Entity)
                .from(Column::DoctorId)
                .to(doctor::Column::Id)
                .into(),
        }
    }
}

impl Related<doctor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Doctor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
