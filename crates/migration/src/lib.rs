//! Migrator registering entity-specific migrations in dependency order.
//! `doctor` precedes `patient` because of the FK; indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_doctor;
mod m20240101_000002_create_patient;
mod m20240101_000003_create_admin;
mod m20240101_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_doctor::Migration),
            Box::new(m20240101_000002_create_patient::Migration),
            Box::new(m20240101_000003_create_admin::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000004_add_indexes::Migration),
        ]
    }
}
