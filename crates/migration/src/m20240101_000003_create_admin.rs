//! Create `admin` table: identity fields plus unique username.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admin::Table)
                    .if_not_exists()
                    .col(pk_auto(Admin::Id))
                    .col(string_len(Admin::FirstName, 256).not_null())
                    .col(string_len(Admin::LastName, 256).not_null())
                    .col(string_len(Admin::MiddleName, 256).not_null())
                    .col(string_len(Admin::Username, 12).unique_key().not_null())
                    .col(string_len(Admin::HashedPassword, 1024).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Admin {
    Table,
    Id,
    FirstName,
    LastName,
    MiddleName,
    Username,
    HashedPassword,
}
