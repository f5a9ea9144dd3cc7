use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{entity::prelude::*, FromQueryResult, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{project, project_skill, student, student_skill};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ProjectSkill,
    StudentSkill,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ProjectSkill => Entity::has_many(project_skill::Entity).into(),
            Relation::StudentSkill => Entity::has_many(student_skill::Entity).into(),
        }
    }
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef {
        project_skill::Relation::Project.def()
    }
    fn via() -> Option<RelationDef> {
        Some(project_skill::Relation::Skill.def().rev())
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        student_skill::Relation::Student.def()
    }
    fn via() -> Option<RelationDef> {
        Some(student_skill::Relation::Skill.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Row shape for batched "skill names per owner" lookups on the link tables.
#[derive(Debug, FromQueryResult)]
pub(crate) struct OwnedSkillName {
    pub owner_id: Uuid,
    pub name: String,
}

/// Group rows already ordered by skill name into `owner -> [name]`.
pub(crate) fn group_names(rows: Vec<OwnedSkillName>) -> HashMap<Uuid, Vec<String>> {
    let mut out: HashMap<Uuid, Vec<String>> = HashMap::new();
    for row in rows {
        out.entry(row.owner_id).or_default().push(row.name);
    }
    out
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, description: &str) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("skill name required".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        description: Set(description.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| match ModelError::from(e) {
        ModelError::Conflict(_) => ModelError::Conflict("skill already exists".into()),
        other => other,
    })
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Exact, case-sensitive lookup.
pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Name.eq(name)).one(db).await?)
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Name).all(db).await?)
}

pub async fn update<C: ConnectionTrait>(db: &C, id: Uuid, name: &str, description: &str) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("skill name required".into()));
    }
    let mut am: ActiveModel = Entity::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or(ModelError::NotFound("skill"))?
        .into();
    am.name = Set(name.trim().to_string());
    am.description = Set(description.to_string());
    am.update(db).await.map_err(|e| match ModelError::from(e) {
        ModelError::Conflict(_) => ModelError::Conflict("skill already exists".into()),
        other => other,
    })
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ModelError::NotFound("skill"));
    }
    Ok(())
}
