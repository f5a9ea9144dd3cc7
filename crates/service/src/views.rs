//! Read-side shapes returned by services. None of them carry credentials.
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use uuid::Uuid;

use models::project::{ProjectStatus, Timeline};
use models::user::Role;
use models::{file, project, student, user};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTimeWithTimeZone,
}

impl From<user::Model> for UserView {
    fn from(u: user::Model) -> Self {
        Self { id: u.id, email: u.email, name: u.name, role: u.role, created_at: u.created_at }
    }
}

/// Role-specific part of a user's detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Profile {
    Student { university: String, skills: Vec<String> },
    Business { company_name: String },
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetail {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    #[serde(flatten)]
    pub profile: Profile,
}

/// Student row in the filtered listing, denormalized with its user and skills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentListItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub university: String,
    pub skills: Vec<String>,
    pub created_at: DateTimeWithTimeZone,
}

impl StudentListItem {
    pub fn new(s: student::Model, u: user::Model, skills: Vec<String>) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            email: u.email,
            name: u.name,
            university: s.university,
            skills,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub duration: i32,
    pub timeline: Timeline,
    pub deliverables: String,
    pub skills: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

impl ProjectView {
    pub fn new(p: project::Model, skills: Vec<String>) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            status: p.status,
            duration: p.duration,
            timeline: p.timeline,
            deliverables: p.deliverables,
            skills,
            created_by: p.created_by,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileView {
    pub id: Uuid,
    pub original_name: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_by: String,
    pub url: String,
    pub created_at: DateTimeWithTimeZone,
}

impl FileView {
    pub fn new(f: file::Model, public_path: &str) -> Self {
        let url = format!("{}/{}", public_path.trim_end_matches('/'), f.file_name);
        Self {
            id: f.id,
            original_name: f.original_name,
            file_name: f.file_name,
            file_path: f.file_path,
            file_size: f.file_size,
            mime_type: f.mime_type,
            uploaded_by: f.uploaded_by,
            url,
            created_at: f.created_at,
        }
    }
}
