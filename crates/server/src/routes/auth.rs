use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use service::auth::domain::{LoginInput, RegisterInput};
use service::views::UserView;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(
    post, path = "/v1/auth/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = crate::openapi::UserResponse),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<UserView>), JsonApiError> {
    let created = state.auth.register(input).await?;
    info!(user_id = %created.id, "register_request_ok");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post, path = "/v1/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In", body = crate::openapi::UserResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<UserView>, JsonApiError> {
    let user = state.auth.login(input).await.map_err(JsonApiError::from_login)?;
    Ok(Json(user))
}
