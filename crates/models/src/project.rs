use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use sea_orm::{entity::prelude::*, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::filters::ProjectFilter;
use crate::{business, project_skill, skill, student, student_project};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl FromStr for ProjectStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" => Ok(ProjectStatus::Open),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            other => Err(ModelError::Validation(format!("unknown project status: {other}"))),
        }
    }
}

/// Unit the project `duration` is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    #[sea_orm(string_value = "day")]
    Day,
    #[sea_orm(string_value = "week")]
    Week,
    #[sea_orm(string_value = "month")]
    Month,
    #[sea_orm(string_value = "year")]
    Year,
}

impl FromStr for Timeline {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(Timeline::Day),
            "week" => Ok(Timeline::Week),
            "month" => Ok(Timeline::Month),
            "year" => Ok(Timeline::Year),
            other => Err(ModelError::Validation(format!("unknown timeline: {other}"))),
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeline::Day => "day",
            Timeline::Week => "week",
            Timeline::Month => "month",
            Timeline::Year => "year",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub duration: i32,
    pub timeline: Timeline,
    pub deliverables: String,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Business,
    ProjectSkill,
    StudentProject,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Business => Entity::belongs_to(business::Entity)
                .from(Column::CreatedBy)
                .to(business::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::ProjectSkill => Entity::has_many(project_skill::Entity).into(),
            Relation::StudentProject => Entity::has_many(student_project::Entity).into(),
        }
    }
}

impl Related<business::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Business.def()
    }
}

impl Related<skill::Entity> for Entity {
    fn to() -> RelationDef {
        project_skill::Relation::Skill.def()
    }
    fn via() -> Option<RelationDef> {
        Some(project_skill::Relation::Project.def().rev())
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        student_project::Relation::Student.def()
    }
    fn via() -> Option<RelationDef> {
        Some(student_project::Relation::Project.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub timeline: Timeline,
    pub deliverables: String,
    pub created_by: Uuid,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub duration: Option<i32>,
    pub timeline: Option<Timeline>,
    pub deliverables: Option<String>,
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewProject) -> Result<Model, ModelError> {
    if input.name.trim().is_empty() {
        return Err(ModelError::Validation("project name required".into()));
    }
    if input.deliverables.trim().is_empty() {
        return Err(ModelError::Validation("deliverables required".into()));
    }
    if input.duration <= 0 {
        return Err(ModelError::Validation("duration must be positive".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        description: Set(input.description),
        status: Set(ProjectStatus::Open),
        duration: Set(input.duration),
        timeline: Set(input.timeline),
        deliverables: Set(input.deliverables),
        created_by: Set(input.created_by),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn list_by_business<C: ConnectionTrait>(db: &C, business_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::CreatedBy.eq(business_id))
        .order_by_desc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn update<C: ConnectionTrait>(db: &C, id: Uuid, changes: ProjectChanges) -> Result<Model, ModelError> {
    if matches!(changes.duration, Some(d) if d <= 0) {
        return Err(ModelError::Validation("duration must be positive".into()));
    }
    let mut am: ActiveModel = Entity::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or(ModelError::NotFound("project"))?
        .into();
    if let Some(name) = changes.name {
        am.name = Set(name);
    }
    if let Some(description) = changes.description {
        am.description = Set(description);
    }
    if let Some(status) = changes.status {
        am.status = Set(status);
    }
    if let Some(duration) = changes.duration {
        am.duration = Set(duration);
    }
    if let Some(timeline) = changes.timeline {
        am.timeline = Set(timeline);
    }
    if let Some(deliverables) = changes.deliverables {
        am.deliverables = Set(deliverables);
    }
    Ok(am.update(db).await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ModelError::NotFound("project"));
    }
    Ok(())
}

/// One page of matching projects, newest first, plus the pre-paging total.
pub async fn search<C: ConnectionTrait>(
    db: &C,
    filter: &ProjectFilter,
    offset: u64,
    limit: u64,
) -> Result<(Vec<Model>, u64), ModelError> {
    let cond = filter.to_condition();
    let total = Entity::find().filter(cond.clone()).count(db).await?;
    let items = Entity::find()
        .filter(cond)
        .order_by_desc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;
    Ok((items, total))
}
