use sea_orm::DatabaseConnection;
use tracing::{info, instrument};
use uuid::Uuid;

use models::business;

use crate::errors::ServiceError;
use crate::transaction;

pub async fn get_business(db: &DatabaseConnection, id: Uuid) -> Result<business::Model, ServiceError> {
    business::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("business"))
}

pub async fn get_business_by_user(db: &DatabaseConnection, user_id: Uuid) -> Result<business::Model, ServiceError> {
    business::find_by_user_id(db, user_id).await?.ok_or_else(|| ServiceError::not_found("business"))
}

/// List all businesses ordered by company name.
pub async fn list_businesses(db: &DatabaseConnection) -> Result<Vec<business::Model>, ServiceError> {
    Ok(business::list_all(db).await?)
}

#[instrument(skip(db))]
pub async fn update_company_name(db: &DatabaseConnection, id: Uuid, company_name: &str) -> Result<business::Model, ServiceError> {
    let txn = transaction::begin(db).await?;
    let res = async { Ok::<_, ServiceError>(business::update_company_name(&txn, id, company_name).await?) }.await;
    let updated = transaction::finish(txn, res).await?;
    info!(business_id = %id, "business_updated");
    Ok(updated)
}

/// Delete a business profile; its projects go with it.
#[instrument(skip(db))]
pub async fn delete_business(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = transaction::begin(db).await?;
    let res = async { Ok::<_, ServiceError>(business::delete(&txn, id).await?) }.await;
    transaction::finish(txn, res).await?;
    info!(business_id = %id, "business_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn update_rejects_blank_company_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let res = update_company_name(&db, Uuid::new_v4(), "   ").await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn get_by_user_maps_missing_to_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<business::Model>::new()])
            .into_connection();
        let res = get_business_by_user(&db, Uuid::new_v4()).await;
        assert!(matches!(res, Err(ServiceError::NotFound(m)) if m == "business not found"));
    }
}
