//! Create `businesses` table with a 1:1 FK to `users`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(uuid(Businesses::Id).primary_key())
                    .col(uuid(Businesses::UserId).unique_key().not_null())
                    .col(string_len(Businesses::CompanyName, 255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_businesses_user")
                            .from(Businesses::Table, Businesses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Businesses::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Businesses { Table, Id, UserId, CompanyName }

#[derive(DeriveIden)]
enum Users { Table, Id }
