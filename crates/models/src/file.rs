use chrono::Utc;
use sea_orm::{entity::prelude::*, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub original_name: String,
    #[sea_orm(unique)]
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_by: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewFile {
    pub id: Uuid,
    pub original_name: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_by: String,
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewFile) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(input.id),
        original_name: Set(input.original_name),
        file_name: Set(input.file_name),
        file_path: Set(input.file_path),
        file_size: Set(input.file_size),
        mime_type: Set(input.mime_type),
        uploaded_by: Set(input.uploaded_by),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn list_by_uploader<C: ConnectionTrait>(db: &C, uploaded_by: &str) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::UploadedBy.eq(uploaded_by))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ModelError::NotFound("file"));
    }
    Ok(())
}
