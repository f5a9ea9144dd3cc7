use models::errors::ModelError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Data that should exist per the schema's invariants does not.
    #[error("integrity error: {0}")]
    Integrity(String),
    #[error("hashing error: {0}")]
    Hash(String),
    /// Filesystem failure while handling uploaded files.
    #[error("storage error: {0}")]
    Storage(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Conflict(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Unauthorized(_) => 1004,
            ServiceError::Hash(_) => 1101,
            ServiceError::Integrity(_) => 1201,
            ServiceError::Storage(_) => 1202,
            ServiceError::Db(_) => 1200,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::Conflict(m) => ServiceError::Conflict(m),
            ModelError::NotFound(entity) => ServiceError::not_found(entity),
            ModelError::Db(e) => ServiceError::Db(e.to_string()),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        ModelError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_map_to_service_errors() {
        let e: ServiceError = ModelError::NotFound("skill").into();
        assert!(matches!(&e, ServiceError::NotFound(m) if m == "skill not found"));
        assert_eq!(e.code(), 1003);

        let e: ServiceError = ModelError::Conflict("email already taken".into()).into();
        assert!(matches!(e, ServiceError::Conflict(_)));

        let e: ServiceError = DbErr::Custom("boom".into()).into();
        assert!(matches!(e, ServiceError::Db(_)));
        assert_eq!(e.code(), 1200);
    }
}
