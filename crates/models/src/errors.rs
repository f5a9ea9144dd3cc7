use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("database error: {0}")]
    Db(DbErr),
}

impl From<DbErr> for ModelError {
    fn from(err: DbErr) -> Self {
        // row vanished between the locked read and the write
        if matches!(err, DbErr::RecordNotUpdated) {
            return ModelError::NotFound("row");
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => ModelError::Conflict(detail),
            _ => ModelError::Db(err),
        }
    }
}

impl ModelError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ModelError::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_sql_errors_stay_db_errors() {
        let err: ModelError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, ModelError::Db(_)));
        assert!(!err.is_conflict());
    }

    #[test]
    fn record_not_updated_is_not_found() {
        let err: ModelError = DbErr::RecordNotUpdated.into();
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn not_found_message_names_entity() {
        assert_eq!(ModelError::NotFound("skill").to_string(), "skill not found");
    }
}
