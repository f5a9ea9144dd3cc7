#![cfg(test)]
use migration::MigratorTrait;
use std::sync::Arc;

use tokio::sync::OnceCell;

use models::db::connect;

use crate::DbConn;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// A migrated connection, or `None` when `SKIP_DB_TESTS` is set or no
/// database is reachable (the calling test then returns early).
pub async fn get_db() -> Option<DbConn> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let migrated = MIGRATED
        .get_or_init(|| async {
            match connect().await {
                Ok(db) => match migration::Migrator::up(&db, None).await {
                    Ok(()) => true,
                    Err(e) => {
                        eprintln!("skip: migrate up failed: {e}");
                        false
                    }
                },
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {e}");
                    false
                }
            }
        })
        .await;
    if !*migrated {
        return None;
    }

    // Fresh connection for the current test's runtime
    connect().await.ok().map(Arc::new)
}

pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
