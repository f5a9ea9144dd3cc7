//! Create `projects` table owned by a business.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(uuid(Projects::Id).primary_key())
                    .col(string_len(Projects::Name, 255).not_null())
                    .col(text(Projects::Description).not_null().default(""))
                    .col(string_len(Projects::Status, 32).not_null().default("open"))
                    .col(integer(Projects::Duration).not_null())
                    .col(string_len(Projects::Timeline, 16).not_null())
                    .col(text(Projects::Deliverables).not_null())
                    .col(uuid(Projects::CreatedBy).not_null())
                    .col(
                        timestamp_with_time_zone(Projects::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_business")
                            .from(Projects::Table, Projects::CreatedBy)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Projects::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Projects { Table, Id, Name, Description, Status, Duration, Timeline, Deliverables, CreatedBy, CreatedAt }

#[derive(DeriveIden)]
enum Businesses { Table, Id }
