//! Create `patient` table with FK to `doctor`.
//!
//! Deletion of a referenced doctor is restricted; the service layer reports
//! the conflict before the database ever sees it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Patient::Table)
                    .if_not_exists()
                    .col(pk_auto(Patient::Id))
                    .col(string_len(Patient::FirstName, 256).not_null())
                    .col(string_len(Patient::LastName, 256).not_null())
                    .col(string_len(Patient::MiddleName, 256).not_null())
                    .col(string_len(Patient::Iin, 12).unique_key().not_null())
                    .col(string_len(Patient::HashedPassword, 1024).not_null())
                    .col(string_len(Patient::Gender, 16).not_null())
                    .col(
                        integer(Patient::Age)
                            .not_null()
                            .check(Expr::col(Patient::Age).between(0, 120)),
                    )
                    .col(integer(Patient::DoctorId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_patient_doctor")
                            .from(Patient::Table, Patient::DoctorId)
                            .to(Doctor::Table, Doctor::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Patient::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Patient {
    Table,
    Id,
    FirstName,
    LastName,
    MiddleName,
    Iin,
    HashedPassword,
    Gender,
    Age,
    DoctorId,
}

#[derive(DeriveIden)]
enum Doctor {
    Table,
    Id,
}
