//! Unit-of-work helpers over SeaORM transactions.
//!
//! ```ignore
//! let txn = transaction::begin(db).await?;
//! let res = async { /* storage calls on &txn */ }.await;
//! transaction::finish(txn, res).await
//! ```
//! A transaction dropped without `finish` (panic, cancelled request) is rolled
//! back by SeaORM.
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::warn;

use crate::errors::ServiceError;

pub async fn begin(db: &DatabaseConnection) -> Result<DatabaseTransaction, ServiceError> {
    Ok(db.begin().await?)
}

/// Commit on `Ok`, roll back on `Err`. A failed commit is reported as failure.
pub async fn finish<T>(txn: DatabaseTransaction, result: Result<T, ServiceError>) -> Result<T, ServiceError> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rb) = txn.rollback().await {
                warn!(error = %rb, cause = %err, "rollback failed");
            }
            Err(err)
        }
    }
}
