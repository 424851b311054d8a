//! Drop the length cap on `user.email` and `user.fullname`.
//!
//! Request validation sets no upper bound on either field, so a long but valid
//! value must not fail at insert time.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(User::Table)
                    .modify_column(ColumnDef::new(User::Email).text().not_null())
                    .modify_column(ColumnDef::new(User::Fullname).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(User::Table)
                    .modify_column(ColumnDef::new(User::Email).string_len(255).not_null())
                    .modify_column(ColumnDef::new(User::Fullname).string_len(255).not_null())
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum User { Table, Email, Fullname }
