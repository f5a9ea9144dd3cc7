//! OpenAPI document. The `*Request`/`*Response` structs here only describe
//! wire shapes; handlers use the service types directly.
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    /// At least 8 characters
    pub password: String,
    /// `student`, `business` or `admin`
    pub role: String,
    /// Required when role is `student`
    pub university: Option<String>,
    /// Required when role is `business`
    pub company_name: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
}

/// User plus the fields of its role profile (`university`/`skills` or `company_name`).
#[derive(ToSchema)]
pub struct UserDetailResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
    pub university: Option<String>,
    pub skills: Option<Vec<String>>,
    pub company_name: Option<String>,
}

#[derive(ToSchema)]
pub struct StudentItemResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub university: String,
    pub skills: Vec<String>,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct StudentPageResponse {
    pub items: Vec<StudentItemResponse>,
    pub total_count: u64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: u64,
}

#[derive(ToSchema)]
pub struct UniversityRequest { pub university: String }

#[derive(ToSchema)]
pub struct SkillNameRequest { pub skill: String }

#[derive(ToSchema)]
pub struct CompanyNameRequest { pub company_name: String }

#[derive(ToSchema)]
pub struct SkillRequest { pub name: String, pub description: Option<String> }

#[derive(ToSchema)]
pub struct ProjectRequest {
    pub name: String,
    pub description: Option<String>,
    /// Positive number of `timeline` units
    pub duration: i32,
    /// `day`, `week`, `month` or `year`
    pub timeline: String,
    pub deliverables: String,
    /// Existing skill names
    pub skills: Vec<String>,
}

#[derive(ToSchema)]
pub struct ProjectUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `open`, `in_progress` or `completed`
    pub status: Option<String>,
    pub duration: Option<i32>,
    pub timeline: Option<String>,
    pub deliverables: Option<String>,
}

#[derive(ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: String,
    pub duration: i32,
    pub timeline: String,
    pub deliverables: String,
    pub skills: Vec<String>,
    pub created_by: Uuid,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct ProjectPageResponse {
    pub items: Vec<ProjectResponse>,
    pub total_count: u64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: u64,
}

#[derive(ToSchema)]
pub struct FileResponse {
    pub id: Uuid,
    pub original_name: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_by: String,
    /// Public URL under the configured static path
    pub url: String,
    pub created_at: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::users::list,
        crate::routes::users::detail,
        crate::routes::students::list,
        crate::routes::students::list_all,
        crate::routes::students::get,
        crate::routes::students::get_by_user,
        crate::routes::students::update,
        crate::routes::students::delete,
        crate::routes::students::skills,
        crate::routes::students::add_skill,
        crate::routes::students::remove_skill,
        crate::routes::businesses::list,
        crate::routes::businesses::get,
        crate::routes::businesses::get_by_user,
        crate::routes::businesses::update,
        crate::routes::businesses::delete,
        crate::routes::businesses::projects,
        crate::routes::businesses::create_project,
        crate::routes::skills::list,
        crate::routes::skills::create,
        crate::routes::skills::get,
        crate::routes::skills::update,
        crate::routes::skills::delete,
        crate::routes::projects::list,
        crate::routes::projects::list_all,
        crate::routes::projects::get,
        crate::routes::projects::update,
        crate::routes::projects::delete,
        crate::routes::projects::skills,
        crate::routes::projects::add_skill,
        crate::routes::projects::remove_skill,
        crate::routes::projects::students,
        crate::routes::projects::add_student,
        crate::routes::projects::remove_student,
        crate::routes::files::upload,
        crate::routes::files::get,
        crate::routes::files::delete,
        crate::routes::files::by_uploader,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            UserResponse,
            UserDetailResponse,
            StudentItemResponse,
            StudentPageResponse,
            UniversityRequest,
            SkillNameRequest,
            CompanyNameRequest,
            SkillRequest,
            ProjectRequest,
            ProjectUpdateRequest,
            ProjectResponse,
            ProjectPageResponse,
            FileResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Accounts and profile details"),
        (name = "students", description = "Student profiles, search and skills"),
        (name = "businesses", description = "Business profiles and their projects"),
        (name = "skills", description = "Skill catalog"),
        (name = "projects", description = "Projects, search, skills and assignments"),
        (name = "files", description = "Image uploads"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for p in [
            "/health",
            "/v1/auth/register",
            "/v1/students",
            "/v1/projects/{id}/students/{student_id}",
            "/v1/files",
        ] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["components"]["schemas"]["ProjectRequest"].is_object());
    }
}
