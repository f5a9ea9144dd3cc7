//! Create `files` table recording uploaded images stored on disk.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(uuid(Files::Id).primary_key())
                    .col(string_len(Files::OriginalName, 255).not_null())
                    .col(string_len(Files::FileName, 255).unique_key().not_null())
                    .col(string_len(Files::FilePath, 512).not_null())
                    .col(big_integer(Files::FileSize).not_null())
                    .col(string_len(Files::MimeType, 128).not_null())
                    .col(string_len(Files::UploadedBy, 255).not_null())
                    .col(
                        timestamp_with_time_zone(Files::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Files::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Files { Table, Id, OriginalName, FileName, FilePath, FileSize, MimeType, UploadedBy, CreatedAt }
