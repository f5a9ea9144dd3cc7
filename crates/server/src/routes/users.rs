use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use service::user_service;
use service::views::{UserDetail, UserView};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(get, path = "/v1/users", tag = "users", responses((status = 200, description = "All users, newest first")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, JsonApiError> {
    Ok(Json(user_service::list_users(&state.db).await?))
}

#[utoipa::path(
    get, path = "/v1/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User with role profile", body = crate::openapi::UserDetailResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn detail(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<UserDetail>, JsonApiError> {
    Ok(Json(user_service::get_user_detail(&state.db, id).await?))
}
