use sea_orm::DatabaseConnection;
use tracing::{error, instrument};
use uuid::Uuid;

use models::user::Role;
use models::{business, student, student_skill, user};

use crate::errors::ServiceError;
use crate::views::{Profile, UserDetail, UserView};

/// List all users, newest first.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<UserView>, ServiceError> {
    let users = user::list_all(db).await?;
    Ok(users.into_iter().map(UserView::from).collect())
}

/// Assemble the role-specific detail view of a user.
///
/// A student or business user without its profile row violates the
/// registration invariant and is reported as `Integrity`.
#[instrument(skip(db))]
pub async fn get_user_detail(db: &DatabaseConnection, id: Uuid) -> Result<UserDetail, ServiceError> {
    let found = user::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("user"))?;

    let profile = match found.role {
        Role::Student => {
            let s = student::find_by_user_id(db, found.id).await?.ok_or_else(|| {
                error!(user_id = %found.id, "student profile missing");
                ServiceError::Integrity(format!("student profile missing for user {}", found.id))
            })?;
            let skills = student_skill::skill_names_by_student(db, &[s.id])
                .await?
                .remove(&s.id)
                .unwrap_or_default();
            Profile::Student { university: s.university, skills }
        }
        Role::Business => {
            let b = business::find_by_user_id(db, found.id).await?.ok_or_else(|| {
                error!(user_id = %found.id, "business profile missing");
                ServiceError::Integrity(format!("business profile missing for user {}", found.id))
            })?;
            Profile::Business { company_name: b.company_name }
        }
        Role::Admin => Profile::Admin,
    };

    Ok(UserDetail {
        id: found.id,
        email: found.email,
        name: found.name,
        created_at: found.created_at,
        profile,
    })
}
