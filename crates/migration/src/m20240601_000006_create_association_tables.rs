//! Create the many-to-many link tables.
//!
//! Each pair is the composite primary key, which makes a duplicate insert a
//! conflict the storage layer turns into a no-op.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectSkills::Table)
                    .if_not_exists()
                    .col(uuid(ProjectSkills::ProjectId).not_null())
                    .col(uuid(ProjectSkills::SkillId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_project_skills")
                            .col(ProjectSkills::ProjectId)
                            .col(ProjectSkills::SkillId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_skills_project")
                            .from(ProjectSkills::Table, ProjectSkills::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_skills_skill")
                            .from(ProjectSkills::Table, ProjectSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentSkills::Table)
                    .if_not_exists()
                    .col(uuid(StudentSkills::StudentId).not_null())
                    .col(uuid(StudentSkills::SkillId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_student_skills")
                            .col(StudentSkills::StudentId)
                            .col(StudentSkills::SkillId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_skills_student")
                            .from(StudentSkills::Table, StudentSkills::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_skills_skill")
                            .from(StudentSkills::Table, StudentSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentProjects::Table)
                    .if_not_exists()
                    .col(uuid(StudentProjects::StudentId).not_null())
                    .col(uuid(StudentProjects::ProjectId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_student_projects")
                            .col(StudentProjects::StudentId)
                            .col(StudentProjects::ProjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_projects_student")
                            .from(StudentProjects::Table, StudentProjects::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_projects_project")
                            .from(StudentProjects::Table, StudentProjects::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(StudentProjects::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(StudentSkills::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ProjectSkills::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProjectSkills { Table, ProjectId, SkillId }

#[derive(DeriveIden)]
enum StudentSkills { Table, StudentId, SkillId }

#[derive(DeriveIden)]
enum StudentProjects { Table, StudentId, ProjectId }

#[derive(DeriveIden)]
enum Projects { Table, Id }

#[derive(DeriveIden)]
enum Students { Table, Id }

#[derive(DeriveIden)]
enum Skills { Table, Id }
