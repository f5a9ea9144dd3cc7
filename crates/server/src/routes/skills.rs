use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use common::types::Message;
use models::skill;
use service::skill_service::{self, SkillInput};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(get, path = "/v1/skills", tag = "skills", responses((status = 200, description = "Skill catalog by name")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<skill::Model>>, JsonApiError> {
    Ok(Json(skill_service::list_skills(&state.db).await?))
}

#[utoipa::path(
    post, path = "/v1/skills", tag = "skills",
    request_body = crate::openapi::SkillRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 409, description = "Name taken"))
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<SkillInput>,
) -> Result<(StatusCode, Json<skill::Model>), JsonApiError> {
    let created = skill_service::create_skill(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/v1/skills/{id}", tag = "skills",
    params(("id" = Uuid, Path, description = "Skill id")),
    responses((status = 200, description = "Skill"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<skill::Model>, JsonApiError> {
    Ok(Json(skill_service::get_skill(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/v1/skills/{id}", tag = "skills",
    params(("id" = Uuid, Path, description = "Skill id")),
    request_body = crate::openapi::SkillRequest,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"), (status = 409, description = "Name taken"))
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SkillInput>,
) -> Result<Json<skill::Model>, JsonApiError> {
    Ok(Json(skill_service::update_skill(&state.db, id, input).await?))
}

#[utoipa::path(
    delete, path = "/v1/skills/{id}", tag = "skills",
    params(("id" = Uuid, Path, description = "Skill id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Message>, JsonApiError> {
    skill_service::delete_skill(&state.db, id).await?;
    Ok(Json(Message::new("skill deleted")))
}
