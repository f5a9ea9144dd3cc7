use sea_orm::{entity::prelude::*, sea_query::OnConflict, JoinType, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{project, student};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub project_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
    Project,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Student => Entity::belongs_to(student::Entity)
                .from(Column::StudentId)
                .to(student::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Project => Entity::belongs_to(project::Entity)
                .from(Column::ProjectId)
                .to(project::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn add<C: ConnectionTrait>(db: &C, project_id: Uuid, student_id: Uuid) -> Result<(), ModelError> {
    let am = ActiveModel { student_id: Set(student_id), project_id: Set(project_id) };
    let res = Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::StudentId, Column::ProjectId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;
    match res {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub async fn remove<C: ConnectionTrait>(db: &C, project_id: Uuid, student_id: Uuid) -> Result<(), ModelError> {
    Entity::delete_many()
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::StudentId.eq(student_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Students assigned to a project, ordered by university.
pub async fn students_of<C: ConnectionTrait>(db: &C, project_id: Uuid) -> Result<Vec<student::Model>, ModelError> {
    Ok(student::Entity::find()
        .join(JoinType::InnerJoin, student::Relation::StudentProject.def())
        .filter(Column::ProjectId.eq(project_id))
        .order_by_asc(student::Column::University)
        .order_by_asc(student::Column::Id)
        .all(db)
        .await?)
}
