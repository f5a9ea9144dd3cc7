use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use service::file_service::FileDeleteOutcome;
use service::views::FileView;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// Multipart form field carrying the image.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// Identifier recorded as the uploader
    pub uploaded_by: String,
}

#[utoipa::path(
    post, path = "/v1/files", tag = "files",
    params(UploadQuery),
    responses(
        (status = 201, description = "Stored", body = crate::openapi::FileResponse),
        (status = 400, description = "Missing field, empty or unsupported file"),
        (status = 413, description = "Too large")
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    Query(q): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<FileView>), JsonApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!(error = %e, "multipart read failed");
        JsonApiError::new(e.status(), "Upload Failed", Some(e.body_text()))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| JsonApiError::new(e.status(), "Upload Failed", Some(e.body_text())))?;

        let stored = state
            .files
            .upload(&original_name, content_type.as_deref(), &bytes, &q.uploaded_by)
            .await?;
        return Ok((StatusCode::CREATED, Json(stored)));
    }
    Err(JsonApiError::bad_request(format!("multipart field `{FILE_FIELD}` required")))
}

#[utoipa::path(
    get, path = "/v1/files/{id}", tag = "files",
    params(("id" = Uuid, Path, description = "File id")),
    responses((status = 200, description = "File metadata", body = crate::openapi::FileResponse), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<FileView>, JsonApiError> {
    Ok(Json(state.files.get(id).await?))
}

#[utoipa::path(
    delete, path = "/v1/files/{id}", tag = "files",
    params(("id" = Uuid, Path, description = "File id")),
    responses((status = 200, description = "Row deleted; reports whether the file left disk"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<FileDeleteOutcome>, JsonApiError> {
    Ok(Json(state.files.delete(id).await?))
}

#[utoipa::path(
    get, path = "/v1/files/by-uploader/{uploaded_by}", tag = "files",
    params(("uploaded_by" = String, Path, description = "Uploader identifier")),
    responses((status = 200, description = "Files, newest first"))
)]
pub async fn by_uploader(
    State(state): State<AppState>,
    Path(uploaded_by): Path<String>,
) -> Result<Json<Vec<FileView>>, JsonApiError> {
    Ok(Json(state.files.list_by_uploader(&uploaded_by).await?))
}
