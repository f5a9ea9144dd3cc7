use sea_orm::{entity::prelude::*, JoinType, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::filters::StudentFilter;
use crate::{project, skill, student_project, student_skill, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub university: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    StudentSkill,
    StudentProject,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::StudentSkill => Entity::has_many(student_skill::Entity).into(),
            Relation::StudentProject => Entity::has_many(student_project::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<skill::Entity> for Entity {
    fn to() -> RelationDef {
        student_skill::Relation::Skill.def()
    }
    fn via() -> Option<RelationDef> {
        Some(student_skill::Relation::Student.def().rev())
    }
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef {
        student_project::Relation::Project.def()
    }
    fn via() -> Option<RelationDef> {
        Some(student_project::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, user_id: Uuid, university: &str) -> Result<Model, ModelError> {
    if university.trim().is_empty() {
        return Err(ModelError::Validation("university required".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        university: Set(university.trim().to_string()),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_user_id<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?)
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .order_by_asc(Column::University)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn update_university<C: ConnectionTrait>(db: &C, id: Uuid, university: &str) -> Result<Model, ModelError> {
    if university.trim().is_empty() {
        return Err(ModelError::Validation("university required".into()));
    }
    let mut am: ActiveModel = Entity::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or(ModelError::NotFound("student"))?
        .into();
    am.university = Set(university.trim().to_string());
    Ok(am.update(db).await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ModelError::NotFound("student"));
    }
    Ok(())
}

/// One page of students joined with their user rows, ordered by email then id,
/// plus the total number of matches before paging.
pub async fn search<C: ConnectionTrait>(
    db: &C,
    filter: &StudentFilter,
    offset: u64,
    limit: u64,
) -> Result<(Vec<(Model, user::Model)>, u64), ModelError> {
    let cond = filter.to_condition();

    let total = Entity::find()
        .join(JoinType::InnerJoin, Relation::User.def())
        .filter(cond.clone())
        .count(db)
        .await?;

    let rows = Entity::find()
        .find_also_related(user::Entity)
        .filter(cond)
        .order_by_asc(user::Column::Email)
        .order_by_asc(Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;

    let items = rows
        .into_iter()
        .filter_map(|(s, u)| u.map(|u| (s, u)))
        .collect();
    Ok((items, total))
}
