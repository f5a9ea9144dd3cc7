use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::filters::ProjectFilter;
use models::project::{NewProject, ProjectChanges, ProjectStatus, Timeline};
use models::{business, project, project_skill, skill, student, student_project};

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::transaction;
use crate::views::ProjectView;

/// Project creation payload; `skills` are catalog names attached on creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub duration: i32,
    pub timeline: String,
    pub deliverables: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Partial update; blank strings are treated as "unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub duration: Option<i32>,
    pub timeline: Option<String>,
    pub deliverables: Option<String>,
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

impl UpdateProjectInput {
    fn into_changes(self) -> Result<ProjectChanges, ServiceError> {
        Ok(ProjectChanges {
            name: non_blank(self.name).map(|s| s.trim().to_string()),
            description: non_blank(self.description),
            status: non_blank(self.status).map(|s| s.parse::<ProjectStatus>()).transpose()?,
            duration: self.duration,
            timeline: non_blank(self.timeline).map(|s| s.parse::<Timeline>()).transpose()?,
            deliverables: non_blank(self.deliverables),
        })
    }
}

/// Skill names deduplicated, trimmed, blanks dropped; first occurrence wins.
fn distinct_skill_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for n in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !out.iter().any(|seen| seen == n) {
            out.push(n.to_string());
        }
    }
    out
}

async fn attach_skills<C: ConnectionTrait>(
    db: &C,
    projects: Vec<project::Model>,
) -> Result<Vec<ProjectView>, ServiceError> {
    let ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();
    let mut skills: HashMap<Uuid, Vec<String>> = project_skill::skill_names_by_project(db, &ids).await?;
    Ok(projects
        .into_iter()
        .map(|p| {
            let names = skills.remove(&p.id).unwrap_or_default();
            ProjectView::new(p, names)
        })
        .collect())
}

/// Create a project for a business and attach its initial skills.
///
/// Runs in one transaction: an unknown business or skill name leaves no
/// project and no links behind.
#[instrument(skip(db, input), fields(name = %input.name, skills = input.skills.len()))]
pub async fn create_project(
    db: &DatabaseConnection,
    business_id: Uuid,
    input: CreateProjectInput,
) -> Result<ProjectView, ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("project name required".into()));
    }
    if input.deliverables.trim().is_empty() {
        return Err(ServiceError::Validation("deliverables required".into()));
    }
    if input.duration <= 0 {
        return Err(ServiceError::Validation("duration must be positive".into()));
    }
    let timeline: Timeline = input.timeline.parse()?;
    let names = distinct_skill_names(&input.skills);

    let txn = transaction::begin(db).await?;
    let res = async {
        business::find_by_id(&txn, business_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("business"))?;
        let created = project::create(
            &txn,
            NewProject {
                name: input.name.clone(),
                description: input.description.clone(),
                duration: input.duration,
                timeline,
                deliverables: input.deliverables.clone(),
                created_by: business_id,
            },
        )
        .await?;
        for name in &names {
            let sk = skill::find_by_name(&txn, name)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("skill {name} not found")))?;
            project_skill::add(&txn, created.id, sk.id).await?;
        }
        Ok::<_, ServiceError>(created)
    }
    .await;
    let created = transaction::finish(txn, res).await?;

    info!(project_id = %created.id, business_id = %business_id, "project_created");
    // re-read so skill order matches get_project
    let mut views = attach_skills(db, vec![created]).await?;
    views.pop().ok_or_else(|| ServiceError::not_found("project"))
}

pub async fn get_project(db: &DatabaseConnection, id: Uuid) -> Result<ProjectView, ServiceError> {
    let found = project::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("project"))?;
    let mut views = attach_skills(db, vec![found]).await?;
    views.pop().ok_or_else(|| ServiceError::not_found("project"))
}

pub async fn list_all_projects(db: &DatabaseConnection) -> Result<Vec<ProjectView>, ServiceError> {
    let all = project::list_all(db).await?;
    attach_skills(db, all).await
}

pub async fn list_business_projects(db: &DatabaseConnection, business_id: Uuid) -> Result<Vec<ProjectView>, ServiceError> {
    business::find_by_id(db, business_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("business"))?;
    let owned = project::list_by_business(db, business_id).await?;
    attach_skills(db, owned).await
}

/// Filtered, paginated project listing, newest first.
#[instrument(skip(db))]
pub async fn list_projects(
    db: &DatabaseConnection,
    filter: &ProjectFilter,
    pagination: Pagination,
) -> Result<Page<ProjectView>, ServiceError> {
    let p = pagination.normalize();
    let (rows, total) = project::search(db, filter, p.offset(), p.limit_u64()).await?;
    let items = attach_skills(db, rows).await?;
    Ok(Page::new(items, total, p))
}

#[instrument(skip(db, input))]
pub async fn update_project(db: &DatabaseConnection, id: Uuid, input: UpdateProjectInput) -> Result<ProjectView, ServiceError> {
    let changes = input.into_changes()?;
    let txn = transaction::begin(db).await?;
    let res = async { Ok::<_, ServiceError>(project::update(&txn, id, changes).await?) }.await;
    let updated = transaction::finish(txn, res).await?;
    info!(project_id = %id, "project_updated");
    let mut views = attach_skills(db, vec![updated]).await?;
    views.pop().ok_or_else(|| ServiceError::not_found("project"))
}

#[instrument(skip(db))]
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = transaction::begin(db).await?;
    let res = async { Ok::<_, ServiceError>(project::delete(&txn, id).await?) }.await;
    transaction::finish(txn, res).await?;
    info!(project_id = %id, "project_deleted");
    Ok(())
}

pub async fn project_skills(db: &DatabaseConnection, id: Uuid) -> Result<Vec<skill::Model>, ServiceError> {
    project::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("project"))?;
    Ok(project_skill::skills_of(db, id).await?)
}

#[instrument(skip(db))]
pub async fn add_project_skill(db: &DatabaseConnection, project_id: Uuid, name: &str) -> Result<(), ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation("skill name required".into()));
    }
    let txn = transaction::begin(db).await?;
    let res = async {
        project::find_by_id(&txn, project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project"))?;
        let sk = skill::find_by_name(&txn, name)
            .await?
            .ok_or_else(|| ServiceError::not_found("skill"))?;
        project_skill::add(&txn, project_id, sk.id).await?;
        Ok::<_, ServiceError>(())
    }
    .await;
    transaction::finish(txn, res).await?;
    info!(project_id = %project_id, skill = name, "project_skill_added");
    Ok(())
}

#[instrument(skip(db))]
pub async fn remove_project_skill(db: &DatabaseConnection, project_id: Uuid, name: &str) -> Result<(), ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation("skill name required".into()));
    }
    let txn = transaction::begin(db).await?;
    let res = async {
        project::find_by_id(&txn, project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project"))?;
        let sk = skill::find_by_name(&txn, name)
            .await?
            .ok_or_else(|| ServiceError::not_found("skill"))?;
        project_skill::remove(&txn, project_id, sk.id).await?;
        Ok::<_, ServiceError>(())
    }
    .await;
    transaction::finish(txn, res).await?;
    info!(project_id = %project_id, skill = name, "project_skill_removed");
    Ok(())
}

/// Students assigned to a project, ordered by university.
pub async fn project_students(db: &DatabaseConnection, id: Uuid) -> Result<Vec<student::Model>, ServiceError> {
    project::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("project"))?;
    Ok(student_project::students_of(db, id).await?)
}

#[instrument(skip(db))]
pub async fn add_project_student(db: &DatabaseConnection, project_id: Uuid, student_id: Uuid) -> Result<(), ServiceError> {
    let txn = transaction::begin(db).await?;
    let res = async {
        project::find_by_id(&txn, project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project"))?;
        student::find_by_id(&txn, student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("student"))?;
        student_project::add(&txn, project_id, student_id).await?;
        Ok::<_, ServiceError>(())
    }
    .await;
    transaction::finish(txn, res).await?;
    info!(project_id = %project_id, student_id = %student_id, "project_student_added");
    Ok(())
}

#[instrument(skip(db))]
pub async fn remove_project_student(db: &DatabaseConnection, project_id: Uuid, student_id: Uuid) -> Result<(), ServiceError> {
    let txn = transaction::begin(db).await?;
    let res = async {
        project::find_by_id(&txn, project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project"))?;
        student_project::remove(&txn, project_id, student_id).await?;
        Ok::<_, ServiceError>(())
    }
    .await;
    transaction::finish(txn, res).await?;
    info!(project_id = %project_id, student_id = %student_id, "project_student_removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use models::user::{self, Role};
    use sea_orm::{DatabaseBackend, EntityTrait, MockDatabase, MockExecResult, Value};

    use super::*;
    use crate::test_support::{get_db, unique};

    fn input(skills: &[&str]) -> CreateProjectInput {
        CreateProjectInput {
            name: "Landing page".into(),
            description: "Marketing site".into(),
            duration: 2,
            timeline: "week".into(),
            deliverables: "Deployed site".into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn skill_names_are_trimmed_and_deduplicated() {
        let names = vec![" Go".to_string(), "Go".into(), "".into(), "Rust".into()];
        assert_eq!(distinct_skill_names(&names), vec!["Go".to_string(), "Rust".to_string()]);
    }

    #[test]
    fn update_input_ignores_blanks_and_validates_enums() {
        let changes = UpdateProjectInput {
            name: Some("  ".into()),
            status: Some("completed".into()),
            ..Default::default()
        }
        .into_changes()
        .unwrap();
        assert!(changes.name.is_none());
        assert_eq!(changes.status, Some(ProjectStatus::Completed));

        let bad = UpdateProjectInput { timeline: Some("decade".into()), ..Default::default() }.into_changes();
        assert!(matches!(bad, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn create_validates_before_opening_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let mut bad = input(&[]);
        bad.duration = 0;
        assert!(matches!(create_project(&db, Uuid::new_v4(), bad).await, Err(ServiceError::Validation(_))));
        let mut bad = input(&[]);
        bad.timeline = "quarter".into();
        assert!(matches!(create_project(&db, Uuid::new_v4(), bad).await, Err(ServiceError::Validation(_))));
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn create_with_unknown_business_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<business::Model>::new()])
            .into_connection();
        let res = create_project(&db, Uuid::new_v4(), input(&["Go"])).await;
        assert!(matches!(res, Err(ServiceError::NotFound(m)) if m == "business not found"));
    }

    #[tokio::test]
    async fn create_returns_skills_in_stored_order() {
        let business_id = Uuid::new_v4();
        let b = business::Model { id: business_id, user_id: Uuid::new_v4(), company_name: "Acme".into() };
        let p = project::Model {
            id: Uuid::new_v4(),
            name: "Landing page".into(),
            description: "Marketing site".into(),
            status: ProjectStatus::Open,
            duration: 2,
            timeline: Timeline::Week,
            deliverables: "Deployed site".into(),
            created_by: business_id,
            created_at: Utc::now().into(),
        };
        let skill_row = |name: &str| skill::Model {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            created_at: Utc::now().into(),
        };
        // collation puts "go" before "Rust", byte order would not
        let stored = vec![
            BTreeMap::from([("owner_id", Value::from(p.id)), ("name", Value::from("go"))]),
            BTreeMap::from([("owner_id", Value::from(p.id)), ("name", Value::from("Rust"))]),
        ];
        let linked = || MockExecResult { last_insert_id: 0, rows_affected: 1 };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![b]])
            .append_query_results([vec![p.clone()]])
            .append_query_results([vec![skill_row("Rust")]])
            .append_query_results([vec![skill_row("go")]])
            .append_query_results([stored])
            .append_exec_results([linked(), linked()])
            .into_connection();

        let view = create_project(&db, business_id, input(&["Rust", "go"])).await.unwrap();
        assert_eq!(view.id, p.id);
        assert_eq!(view.skills, vec!["go".to_string(), "Rust".to_string()]);
    }

    async fn register_business(db: &DatabaseConnection) -> Result<(Uuid, Uuid), anyhow::Error> {
        let u = user::create(db, &format!("{}@example.com", unique("biz")), "Biz", "h".into(), Role::Business).await?;
        let b = business::create(db, u.id, "Acme").await?;
        Ok((u.id, b.id))
    }

    #[tokio::test]
    async fn unknown_skill_rolls_back_project_creation() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let (user_id, business_id) = register_business(&*db).await?;
        let known = skill::create(&*db, &unique("React"), "").await?;
        let missing = unique("NoSuchSkill");

        let res = create_project(&*db, business_id, input(&[&known.name, &missing])).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert!(list_business_projects(&*db, business_id).await?.is_empty());

        let ok = create_project(&*db, business_id, input(&[&known.name])).await?;
        assert_eq!(ok.skills, vec![known.name.clone()]);
        assert_eq!(ok.status, ProjectStatus::Open);
        let fetched = get_project(&*db, ok.id).await?;
        assert_eq!(fetched.skills, vec![known.name.clone()]);

        let lower = skill::create(&*db, &unique("go"), "").await?;
        let mixed = create_project(&*db, business_id, input(&[&known.name, &lower.name])).await?;
        assert_eq!(mixed.skills, get_project(&*db, mixed.id).await?.skills);
        skill::Entity::delete_by_id(lower.id).exec(&*db).await?;

        user::Entity::delete_by_id(user_id).exec(&*db).await?;
        skill::Entity::delete_by_id(known.id).exec(&*db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn skill_filter_finds_three_of_fifteen() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let (user_id, business_id) = register_business(&*db).await?;
        let tag = Uuid::new_v4().simple().to_string();
        let golang = skill::create(&*db, &format!("Golang-{tag}"), "").await?;
        let marker = unique("batch");

        for i in 0..15 {
            let mut p = input(&[]);
            p.name = format!("{marker} project {i}");
            if i % 5 == 0 {
                p.skills = vec![golang.name.clone()];
            }
            create_project(&*db, business_id, p).await?;
        }

        let filter = ProjectFilter {
            skill: Some(format!("lang-{tag}")),
            search: Some(marker.clone()),
            ..Default::default()
        };
        let page = list_projects(&*db, &filter, Pagination::new(Some(1), Some(10))).await?;
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.iter().all(|p| p.skills == vec![golang.name.clone()]));
        assert!(page.items.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let short = ProjectFilter { max_duration: Some(1), search: Some(marker), ..Default::default() };
        assert_eq!(list_projects(&*db, &short, Pagination::default()).await?.total_count, 0);

        user::Entity::delete_by_id(user_id).exec(&*db).await?;
        skill::Entity::delete_by_id(golang.id).exec(&*db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn project_student_assignment_is_idempotent() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let (biz_user, business_id) = register_business(&*db).await?;
        let su = user::create(&*db, &format!("{}@example.com", unique("stu")), "S", "h".into(), Role::Student).await?;
        let stu = student::create(&*db, su.id, "ETH").await?;
        let created = create_project(&*db, business_id, input(&[])).await?;

        add_project_student(&*db, created.id, stu.id).await?;
        add_project_student(&*db, created.id, stu.id).await?;
        assert_eq!(project_students(&*db, created.id).await?.len(), 1);

        remove_project_student(&*db, created.id, stu.id).await?;
        remove_project_student(&*db, created.id, stu.id).await?;
        assert!(project_students(&*db, created.id).await?.is_empty());

        let missing = add_project_student(&*db, created.id, Uuid::new_v4()).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let updated = update_project(
            &*db,
            created.id,
            UpdateProjectInput { status: Some("in_progress".into()), name: Some(String::new()), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.status, ProjectStatus::InProgress);
        assert_eq!(updated.name, created.name);

        user::Entity::delete_by_id(su.id).exec(&*db).await?;
        user::Entity::delete_by_id(biz_user).exec(&*db).await?;
        Ok(())
    }
}
