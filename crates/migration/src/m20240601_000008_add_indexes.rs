use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Projects: listing by owner and by recency
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_created_by")
                    .table(Projects::Table)
                    .col(Projects::CreatedBy)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_created_at")
                    .table(Projects::Table)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Link tables: reverse lookups by skill / project
        manager
            .create_index(
                Index::create()
                    .name("idx_project_skills_skill")
                    .table(ProjectSkills::Table)
                    .col(ProjectSkills::SkillId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_student_skills_skill")
                    .table(StudentSkills::Table)
                    .col(StudentSkills::SkillId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_student_projects_project")
                    .table(StudentProjects::Table)
                    .col(StudentProjects::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Files: listing by uploader
        manager
            .create_index(
                Index::create()
                    .name("idx_files_uploaded_by")
                    .table(Files::Table)
                    .col(Files::UploadedBy)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_projects_created_by").table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_created_at").table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_project_skills_skill").table(ProjectSkills::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_student_skills_skill").table(StudentSkills::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_student_projects_project").table(StudentProjects::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_files_uploaded_by").table(Files::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Projects { Table, CreatedBy, CreatedAt }

#[derive(DeriveIden)]
enum ProjectSkills { Table, SkillId }

#[derive(DeriveIden)]
enum StudentSkills { Table, SkillId }

#[derive(DeriveIden)]
enum StudentProjects { Table, ProjectId }

#[derive(DeriveIden)]
enum Files { Table, UploadedBy }
