use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::skill;

use crate::errors::ServiceError;
use crate::transaction;

#[derive(Debug, Clone, Deserialize)]
pub struct SkillInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Add a skill to the catalog. Names are unique.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_skill(db: &DatabaseConnection, input: SkillInput) -> Result<skill::Model, ServiceError> {
    let txn = transaction::begin(db).await?;
    let res = async { Ok::<_, ServiceError>(skill::create(&txn, &input.name, &input.description).await?) }.await;
    let created = transaction::finish(txn, res).await?;
    info!(skill_id = %created.id, "skill_created");
    Ok(created)
}

pub async fn get_skill(db: &DatabaseConnection, id: Uuid) -> Result<skill::Model, ServiceError> {
    skill::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("skill"))
}

pub async fn list_skills(db: &DatabaseConnection) -> Result<Vec<skill::Model>, ServiceError> {
    Ok(skill::list_all(db).await?)
}

#[instrument(skip(db, input))]
pub async fn update_skill(db: &DatabaseConnection, id: Uuid, input: SkillInput) -> Result<skill::Model, ServiceError> {
    let txn = transaction::begin(db).await?;
    let res = async { Ok::<_, ServiceError>(skill::update(&txn, id, &input.name, &input.description).await?) }.await;
    let updated = transaction::finish(txn, res).await?;
    info!(skill_id = %id, "skill_updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_skill(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = transaction::begin(db).await?;
    let res = async { Ok::<_, ServiceError>(skill::delete(&txn, id).await?) }.await;
    transaction::finish(txn, res).await?;
    info!(skill_id = %id, "skill_deleted");
    Ok(())
}
