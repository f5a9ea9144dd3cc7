use std::collections::HashMap;

use sea_orm::{entity::prelude::*, sea_query::OnConflict, JoinType, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{skill, student};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_skills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub skill_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
    Skill,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Student => Entity::belongs_to(student::Entity)
                .from(Column::StudentId)
                .to(student::Column::Id)
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

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Skill.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Link a skill to a student. An existing pair is left untouched.
pub async fn add<C: ConnectionTrait>(db: &C, student_id: Uuid, skill_id: Uuid) -> Result<(), ModelError> {
    let am = ActiveModel { student_id: Set(student_id), skill_id: Set(skill_id) };
    let res = Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::StudentId, Column::SkillId])
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
pub async fn remove<C: ConnectionTrait>(db: &C, student_id: Uuid, skill_id: Uuid) -> Result<(), ModelError> {
    Entity::delete_many()
        .filter(Column::StudentId.eq(student_id))
        .filter(Column::SkillId.eq(skill_id))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn skills_of<C: ConnectionTrait>(db: &C, student_id: Uuid) -> Result<Vec<skill::Model>, ModelError> {
    Ok(skill::Entity::find()
        .join(JoinType::InnerJoin, skill::Relation::StudentSkill.def())
        .filter(Column::StudentId.eq(student_id))
        .order_by_asc(skill::Column::Name)
        .all(db)
        .await?)
}

/// Skill names for many students in one query, each list ordered by name.
pub async fn skill_names_by_student<C: ConnectionTrait>(
    db: &C,
    student_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<String>>, ModelError> {
    if student_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Entity::find()
        .select_only()
        .column_as(Column::StudentId, "owner_id")
        .column_as(skill::Column::Name, "name")
        .join(JoinType::InnerJoin, Relation::Skill.def())
        .filter(Column::StudentId.is_in(student_ids.to_vec()))
        .order_by_asc(skill::Column::Name)
        .into_model::<skill::OwnedSkillName>()
        .all(db)
        .await?;
    Ok(skill::group_names(rows))
}
