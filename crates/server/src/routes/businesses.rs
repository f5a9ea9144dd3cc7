use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::Message;
use models::business;
use service::project_service::{self, CreateProjectInput};
use service::business_service;
use service::views::ProjectView;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateBusinessInput {
    pub company_name: String,
}

#[utoipa::path(get, path = "/v1/businesses", tag = "businesses", responses((status = 200, description = "All businesses by company name")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<business::Model>>, JsonApiError> {
    Ok(Json(business_service::list_businesses(&state.db).await?))
}

#[utoipa::path(
    get, path = "/v1/businesses/{id}", tag = "businesses",
    params(("id" = Uuid, Path, description = "Business id")),
    responses((status = 200, description = "Business profile"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<business::Model>, JsonApiError> {
    Ok(Json(business_service::get_business(&state.db, id).await?))
}

#[utoipa::path(
    get, path = "/v1/businesses/by-user/{user_id}", tag = "businesses",
    params(("user_id" = Uuid, Path, description = "Owning user id")),
    responses((status = 200, description = "Business profile"), (status = 404, description = "Not Found"))
)]
pub async fn get_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<business::Model>, JsonApiError> {
    Ok(Json(business_service::get_business_by_user(&state.db, user_id).await?))
}

#[utoipa::path(
    put, path = "/v1/businesses/{id}", tag = "businesses",
    params(("id" = Uuid, Path, description = "Business id")),
    request_body = crate::openapi::CompanyNameRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateBusinessInput>,
) -> Result<Json<business::Model>, JsonApiError> {
    Ok(Json(business_service::update_company_name(&state.db, id, &input.company_name).await?))
}

#[utoipa::path(
    delete, path = "/v1/businesses/{id}", tag = "businesses",
    params(("id" = Uuid, Path, description = "Business id")),
    responses((status = 200, description = "Deleted with its projects"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Message>, JsonApiError> {
    business_service::delete_business(&state.db, id).await?;
    Ok(Json(Message::new("business deleted")))
}

#[utoipa::path(
    get, path = "/v1/businesses/{id}/projects", tag = "businesses",
    params(("id" = Uuid, Path, description = "Business id")),
    responses((status = 200, description = "Projects of the business, newest first"), (status = 404, description = "Not Found"))
)]
pub async fn projects(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Vec<ProjectView>>, JsonApiError> {
    Ok(Json(project_service::list_business_projects(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/v1/businesses/{id}/projects", tag = "businesses",
    params(("id" = Uuid, Path, description = "Owning business id")),
    request_body = crate::openapi::ProjectRequest,
    responses(
        (status = 201, description = "Created with skills", body = crate::openapi::ProjectResponse),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Business or skill not found")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateProjectInput>,
) -> Result<(StatusCode, Json<ProjectView>), JsonApiError> {
    let created = project_service::create_project(&state.db, id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
