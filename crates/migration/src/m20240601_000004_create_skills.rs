//! Create `skills` catalog table. Names are unique so lookups by name resolve
//! to at most one row.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Skills::Table)
                    .if_not_exists()
                    .col(uuid(Skills::Id).primary_key())
                    .col(string_len(Skills::Name, 128).unique_key().not_null())
                    .col(text(Skills::Description).not_null().default(""))
                    .col(
                        timestamp_with_time_zone(Skills::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Skills::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Skills { Table, Id, Name, Description, CreatedAt }
