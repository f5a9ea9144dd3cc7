//! Service layer providing business-oriented operations on top of models.
//! - Composes storage calls into transactions (registration, project creation,
//!   association changes).
//! - Assembles read views (user detail, paginated listings) without credentials.
//! - Maps storage failures into `ServiceError`.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub mod errors;
pub mod pagination;
pub mod transaction;
pub mod credentials;
pub mod views;
pub mod auth;
pub mod user_service;
pub mod student_service;
pub mod business_service;
pub mod skill_service;
pub mod project_service;
pub mod file_service;
#[cfg(test)]
pub mod test_support;

/// Shared pool handle held by the stateful services and the HTTP state.
pub type DbConn = Arc<DatabaseConnection>;
