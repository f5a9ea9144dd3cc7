use std::sync::Arc;

use sea_orm::DatabaseConnection;

use configs::StorageConfig;
use service::auth::AuthService;
use service::file_service::FileService;
use service::DbConn;

/// Shared handler state; cloned per request (all fields are cheap handles).
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub auth: AuthService,
    pub files: FileService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, storage: StorageConfig) -> Self {
        let db: DbConn = Arc::new(db);
        Self {
            auth: AuthService::with_argon2(Arc::clone(&db)),
            files: FileService::new(Arc::clone(&db), storage),
            db,
        }
    }
}
