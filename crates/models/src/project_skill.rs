use std::collections::HashMap;

use sea_orm::{entity::prelude::*, sea_query::OnConflict, JoinType, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{project, skill};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_skills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub project_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub skill_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
    Skill,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Project => Entity::belongs_to(project::Entity)
                .from(Column::ProjectId)
                .to(project::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Skill => Entity::belongs_to(skill::Entity)
                .from(Column::SkillId)
                .to(skill::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Skill.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Link a skill to a project. An existing pair is left untouched.
pub async fn add<C: ConnectionTrait>(db: &C, project_id: Uuid, skill_id: Uuid) -> Result<(), ModelError> {
    let am = ActiveModel { project_id: Set(project_id), skill_id: Set(skill_id) };
    let res = Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::ProjectId, Column::SkillId])
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

/// Unlink; removing an absent pair is not an error.
pub async fn remove<C: ConnectionTrait>(db: &C, project_id: Uuid, skill_id: Uuid) -> Result<(), ModelError> {
    Entity::delete_many()
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::SkillId.eq(skill_id))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn skills_of<C: ConnectionTrait>(db: &C, project_id: Uuid) -> Result<Vec<skill::Model>, ModelError> {
    Ok(skill::Entity::find()
        .join(JoinType::InnerJoin, skill::Relation::ProjectSkill.def())
        .filter(Column::ProjectId.eq(project_id))
        .order_by_asc(skill::Column::Name)
        .all(db)
        .await?)
}

/// Skill names for many projects in one query, each list ordered by name.
pub async fn skill_names_by_project<C: ConnectionTrait>(
    db: &C,
    project_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<String>>, ModelError> {
    if project_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Entity::find()
        .select_only()
        .column_as(Column::ProjectId, "owner_id")
        .column_as(skill::Column::Name, "name")
        .join(JoinType::InnerJoin, Relation::Skill.def())
        .filter(Column::ProjectId.is_in(project_ids.to_vec()))
        .order_by_asc(skill::Column::Name)
        .into_model::<skill::OwnedSkillName>()
        .all(db)
        .await?;
    Ok(skill::group_names(rows))
}
