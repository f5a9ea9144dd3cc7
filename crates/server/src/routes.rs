use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use configs::AppConfig;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod auth;
pub mod businesses;
pub mod files;
pub mod projects;
pub mod skills;
pub mod students;
pub mod users;

/// Multipart framing overhead allowed on top of the configured file size.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Versioned REST API (mounted under `/v1`).
pub fn api_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/users", get(users::list))
        .route("/users/:id", get(users::detail))
        .route("/students", get(students::list))
        .route("/students/all", get(students::list_all))
        .route("/students/by-user/:user_id", get(students::get_by_user))
        .route(
            "/students/:id",
            get(students::get).put(students::update).delete(students::delete),
        )
        .route("/students/:id/skills", get(students::skills).post(students::add_skill))
        .route(
            "/students/:id/skills/:skill_name",
            axum::routing::delete(students::remove_skill),
        )
        .route("/businesses", get(businesses::list))
        .route("/businesses/by-user/:user_id", get(businesses::get_by_user))
        .route(
            "/businesses/:id",
            get(businesses::get).put(businesses::update).delete(businesses::delete),
        )
        .route(
            "/businesses/:id/projects",
            get(businesses::projects).post(businesses::create_project),
        )
        .route("/skills", get(skills::list).post(skills::create))
        .route("/skills/:id", get(skills::get).put(skills::update).delete(skills::delete))
        .route("/projects", get(projects::list))
        .route("/projects/all", get(projects::list_all))
        .route(
            "/projects/:id",
            get(projects::get).put(projects::update).delete(projects::delete),
        )
        .route("/projects/:id/skills", get(projects::skills).post(projects::add_skill))
        .route(
            "/projects/:id/skills/:skill_name",
            axum::routing::delete(projects::remove_skill),
        )
        .route("/projects/:id/students", get(projects::students))
        .route(
            "/projects/:id/students/:student_id",
            put(projects::add_student).delete(projects::remove_student),
        )
        .route(
            "/files",
            post(files::upload).layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD)),
        )
        .route("/files/by-uploader/:uploaded_by", get(files::by_uploader))
        .route("/files/:id", get(files::get).delete(files::delete))
}

/// Build the full application router: API, health, OpenAPI document and static uploads.
pub fn build_router(state: AppState, cfg: &AppConfig, cors: CorsLayer) -> Router {
    let static_files = ServeDir::new(&cfg.storage.upload_dir);

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/v1", api_router(cfg.storage.max_upload_bytes))
        .nest_service(&cfg.storage.public_path, static_files)
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(cfg.server.request_timeout_secs)))
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx and friends
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
