use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::Message;
use models::filters::StudentFilter;
use models::{skill, student};
use service::pagination::{Page, Pagination};
use service::student_service;
use service::views::StudentListItem;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentListQuery {
    /// Substring of the student's name
    pub name: Option<String>,
    pub university: Option<String>,
    /// Substring of any of the student's skills
    pub skill: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentInput {
    pub university: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillNameInput {
    pub skill: String,
}

#[utoipa::path(
    get, path = "/v1/students", tag = "students",
    params(StudentListQuery),
    responses((status = 200, description = "Filtered page of students", body = crate::openapi::StudentPageResponse))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<StudentListQuery>,
) -> Result<Json<Page<StudentListItem>>, JsonApiError> {
    let filter = StudentFilter { name: q.name, university: q.university, skill: q.skill };
    let page = student_service::list_students(&state.db, &filter, Pagination::new(q.page, q.limit)).await?;
    Ok(Json(page))
}

#[utoipa::path(get, path = "/v1/students/all", tag = "students", responses((status = 200, description = "All student profiles")))]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<student::Model>>, JsonApiError> {
    Ok(Json(student_service::list_all_students(&state.db).await?))
}

#[utoipa::path(
    get, path = "/v1/students/{id}", tag = "students",
    params(("id" = Uuid, Path, description = "Student id")),
    responses((status = 200, description = "Student profile"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<student::Model>, JsonApiError> {
    Ok(Json(student_service::get_student(&state.db, id).await?))
}

#[utoipa::path(
    get, path = "/v1/students/by-user/{user_id}", tag = "students",
    params(("user_id" = Uuid, Path, description = "Owning user id")),
    responses((status = 200, description = "Student profile"), (status = 404, description = "Not Found"))
)]
pub async fn get_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<student::Model>, JsonApiError> {
    Ok(Json(student_service::get_student_by_user(&state.db, user_id).await?))
}

#[utoipa::path(
    put, path = "/v1/students/{id}", tag = "students",
    params(("id" = Uuid, Path, description = "Student id")),
    request_body = crate::openapi::UniversityRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateStudentInput>,
) -> Result<Json<student::Model>, JsonApiError> {
    Ok(Json(student_service::update_university(&state.db, id, &input.university).await?))
}

#[utoipa::path(
    delete, path = "/v1/students/{id}", tag = "students",
    params(("id" = Uuid, Path, description = "Student id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Message>, JsonApiError> {
    student_service::delete_student(&state.db, id).await?;
    Ok(Json(Message::new("student deleted")))
}

#[utoipa::path(
    get, path = "/v1/students/{id}/skills", tag = "students",
    params(("id" = Uuid, Path, description = "Student id")),
    responses((status = 200, description = "Skills ordered by name"), (status = 404, description = "Not Found"))
)]
pub async fn skills(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Vec<skill::Model>>, JsonApiError> {
    Ok(Json(student_service::student_skills(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/v1/students/{id}/skills", tag = "students",
    params(("id" = Uuid, Path, description = "Student id")),
    request_body = crate::openapi::SkillNameRequest,
    responses((status = 200, description = "Linked (idempotent)"), (status = 404, description = "Student or skill not found"))
)]
pub async fn add_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SkillNameInput>,
) -> Result<Json<Message>, JsonApiError> {
    student_service::add_student_skill(&state.db, id, &input.skill).await?;
    Ok(Json(Message::new("skill added")))
}

#[utoipa::path(
    delete, path = "/v1/students/{id}/skills/{skill_name}", tag = "students",
    params(
        ("id" = Uuid, Path, description = "Student id"),
        ("skill_name" = String, Path, description = "Exact skill name")
    ),
    responses((status = 200, description = "Unlinked (absent pair is fine)"), (status = 404, description = "Student or skill not found"))
)]
pub async fn remove_skill(
    State(state): State<AppState>,
    Path((id, skill_name)): Path<(Uuid, String)>,
) -> Result<Json<Message>, JsonApiError> {
    student_service::remove_student_skill(&state.db, id, &skill_name).await?;
    Ok(Json(Message::new("skill removed")))
}
