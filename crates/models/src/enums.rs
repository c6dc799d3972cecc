//! String-backed enums shared by the entities. Stored values match the wire
//! representation, so no serde renames are needed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Gender {
    #[sea_orm(string_value = "Male")]
    Male,
    #[sea_orm(string_value = "Female")]
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Qualification {
    #[sea_orm(string_value = "Pediatrician")]
    Pediatrician,
    #[sea_orm(string_value = "Gynecologist")]
    Gynecologist,
    #[sea_orm(string_value = "Psychiatrist")]
    Psychiatrist,
    #[sea_orm(string_value = "Internists")]
    Internists,
    #[sea_orm(string_value = "Oncologist")]
    Oncologist,
    #[sea_orm(string_value = "Dermatologist")]
    Dermatologist,
}
