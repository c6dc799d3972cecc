//! Create `doctor` table: identity fields, unique IIN, qualification enum value.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Doctor::Table)
                    .if_not_exists()
                    .col(pk_auto(Doctor::Id))
                    .col(string_len(Doctor::FirstName, 256).not_null())
                    .col(string_len(Doctor::LastName, 256).not_null())
                    .col(string_len(Doctor::MiddleName, 256).not_null())
                    .col(string_len(Doctor::Iin, 12).unique_key().not_null())
                    .col(string_len(Doctor::HashedPassword, 1024).not_null())
                    .col(string_len(Doctor::Gender, 16).not_null())
                    .col(
                        integer(Doctor::Age)
                            .not_null()
                            .check(Expr::col(Doctor::Age).between(0, 120)),
                    )
                    .col(string_len(Doctor::Qualification, 32).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Doctor::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Doctor {
    Table,
    Id,
    FirstName,
    LastName,
    MiddleName,
    Iin,
    HashedPassword,
    Gender,
    Age,
    Qualification,
}
