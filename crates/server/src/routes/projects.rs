use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use common::types::Message;
use models::filters::ProjectFilter;
use models::{skill, student};
use service::pagination::{Page, Pagination};
use service::project_service::{self, UpdateProjectInput};
use service::views::ProjectView;

use crate::errors::JsonApiError;
use crate::routes::students::SkillNameInput;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectListQuery {
    /// Substring of any required skill
    pub skill: Option<String>,
    /// Inclusive upper bound on duration; ignored when <= 0
    pub max_duration: Option<i32>,
    /// Substring of name, description or deliverables
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[utoipa::path(
    get, path = "/v1/projects", tag = "projects",
    params(ProjectListQuery),
    responses((status = 200, description = "Filtered page of projects", body = crate::openapi::ProjectPageResponse))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<ProjectListQuery>,
) -> Result<Json<Page<ProjectView>>, JsonApiError> {
    let filter = ProjectFilter { skill: q.skill, max_duration: q.max_duration, search: q.search };
    let page = project_service::list_projects(&state.db, &filter, Pagination::new(q.page, q.limit)).await?;
    info!(total = page.total_count, page = page.page, "list projects");
    Ok(Json(page))
}

#[utoipa::path(get, path = "/v1/projects/all", tag = "projects", responses((status = 200, description = "All projects with skills")))]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<ProjectView>>, JsonApiError> {
    Ok(Json(project_service::list_all_projects(&state.db).await?))
}

#[utoipa::path(
    get, path = "/v1/projects/{id}", tag = "projects",
    params(("id" = Uuid, Path, description = "Project id")),
    responses((status = 200, description = "Project with skills", body = crate::openapi::ProjectResponse), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ProjectView>, JsonApiError> {
    Ok(Json(project_service::get_project(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/v1/projects/{id}", tag = "projects",
    params(("id" = Uuid, Path, description = "Project id")),
    request_body = crate::openapi::ProjectUpdateRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProjectInput>,
) -> Result<Json<ProjectView>, JsonApiError> {
    Ok(Json(project_service::update_project(&state.db, id, input).await?))
}

#[utoipa::path(
    delete, path = "/v1/projects/{id}", tag = "projects",
    params(("id" = Uuid, Path, description = "Project id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Message>, JsonApiError> {
    project_service::delete_project(&state.db, id).await?;
    Ok(Json(Message::new("project deleted")))
}

#[utoipa::path(
    get, path = "/v1/projects/{id}/skills", tag = "projects",
    params(("id" = Uuid, Path, description = "Project id")),
    responses((status = 200, description = "Skills ordered by name"), (status = 404, description = "Not Found"))
)]
pub async fn skills(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Vec<skill::Model>>, JsonApiError> {
    Ok(Json(project_service::project_skills(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/v1/projects/{id}/skills", tag = "projects",
    params(("id" = Uuid, Path, description = "Project id")),
    request_body = crate::openapi::SkillNameRequest,
    responses((status = 200, description = "Linked (idempotent)"), (status = 404, description = "Project or skill not found"))
)]
pub async fn add_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SkillNameInput>,
) -> Result<Json<Message>, JsonApiError> {
    project_service::add_project_skill(&state.db, id, &input.skill).await?;
    Ok(Json(Message::new("skill added")))
}

#[utoipa::path(
    delete, path = "/v1/projects/{id}/skills/{skill_name}", tag = "projects",
    params(
        ("id" = Uuid, Path, description = "Project id"),
        ("skill_name" = String, Path, description = "Exact skill name")
    ),
    responses((status = 200, description = "Unlinked"), (status = 404, description = "Project or skill not found"))
)]
pub async fn remove_skill(
    State(state): State<AppState>,
    Path((id, skill_name)): Path<(Uuid, String)>,
) -> Result<Json<Message>, JsonApiError> {
    project_service::remove_project_skill(&state.db, id, &skill_name).await?;
    Ok(Json(Message::new("skill removed")))
}

#[utoipa::path(
    get, path = "/v1/projects/{id}/students", tag = "projects",
    params(("id" = Uuid, Path, description = "Project id")),
    responses((status = 200, description = "Assigned students by university"), (status = 404, description = "Not Found"))
)]
pub async fn students(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Vec<student::Model>>, JsonApiError> {
    Ok(Json(project_service::project_students(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/v1/projects/{id}/students/{student_id}", tag = "projects",
    params(
        ("id" = Uuid, Path, description = "Project id"),
        ("student_id" = Uuid, Path, description = "Student id")
    ),
    responses((status = 200, description = "Assigned (idempotent)"), (status = 404, description = "Project or student not found"))
)]
pub async fn add_student(
    State(state): State<AppState>,
    Path((id, student_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Message>, JsonApiError> {
    project_service::add_project_student(&state.db, id, student_id).await?;
    Ok(Json(Message::new("student added")))
}

#[utoipa::path(
    delete, path = "/v1/projects/{id}/students/{student_id}", tag = "projects",
    params(
        ("id" = Uuid, Path, description = "Project id"),
        ("student_id" = Uuid, Path, description = "Student id")
    ),
    responses((status = 200, description = "Unassigned"), (status = 404, description = "Project not found"))
)]
pub async fn remove_student(
    State(state): State<AppState>,
    Path((id, student_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Message>, JsonApiError> {
    project_service::remove_project_student(&state.db, id, student_id).await?;
    Ok(Json(Message::new("student removed")))
}
