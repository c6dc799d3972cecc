//! Supporting indexes: FK lookup on `patient.doctor_id`, plus pg_trgm
//! GIN indexes backing the fuzzy-search `similarity()` ordering.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Patient: index on doctor_id
        manager
            .create_index(
                Index::create()
                    .name("idx_patient_doctor")
                    .table(Patient::Table)
                    .col(Patient::DoctorId)
                    .to_owned(),
            )
            .await?;

        let conn = manager.get_connection();
        conn.execute_unprepared("CREATE EXTENSION IF NOT EXISTS pg_trgm")
            .await?;
        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_doctor_name_trgm ON doctor \
             USING gin ((first_name || ' ' || last_name || ' ' || middle_name) gin_trgm_ops)",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_patient_name_trgm ON patient \
             USING gin ((first_name || ' ' || last_name || ' ' || middle_name) gin_trgm_ops)",
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_patient_name_trgm")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_doctor_name_trgm")
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_patient_doctor")
                    .table(Patient::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Patient {
    Table,
    DoctorId,
}
