//! Uploaded image storage: bytes on disk under a generated name, metadata in
//! the `files` table. The row never outlives its file; a failed removal of the
//! physical file after the row is gone is reported, not hidden.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use configs::StorageConfig;
use models::file::{self, NewFile};

use crate::errors::ServiceError;
use crate::transaction;
use crate::DbConn;
use crate::views::FileView;

pub const ALLOWED_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];
pub const DEFAULT_EXTENSION: &str = ".png";

/// Lowercased extension with leading dot; files without one are stored as PNG.
pub fn normalized_extension(original_name: &str) -> Result<String, ServiceError> {
    let ext = match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(e) => format!(".{}", e.to_ascii_lowercase()),
        None => return Ok(DEFAULT_EXTENSION.to_string()),
    };
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(ServiceError::Validation(format!(
            "unsupported file type {ext}, allowed: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )))
    }
}

fn mime_for(ext: &str) -> &'static str {
    match ext {
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        _ => "image/png",
    }
}

/// Result of deleting a file record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileDeleteOutcome {
    pub id: Uuid,
    /// `false` when the row is gone but the file stayed on disk.
    pub physical_removed: bool,
}

#[derive(Clone)]
pub struct FileService {
    db: DbConn,
    storage: StorageConfig,
}

impl FileService {
    pub fn new(db: impl Into<DbConn>, storage: StorageConfig) -> Self { Self { db: db.into(), storage } }

    pub fn max_upload_bytes(&self) -> usize { self.storage.max_upload_bytes }

    fn path_for(&self, file_name: &str) -> PathBuf {
        Path::new(&self.storage.upload_dir).join(file_name)
    }

    /// Write the bytes under `<uuid><ext>` and record them. If the insert
    /// fails the written file is removed again.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
        uploaded_by: &str,
    ) -> Result<FileView, ServiceError> {
        if uploaded_by.trim().is_empty() {
            return Err(ServiceError::Validation("uploaded_by required".into()));
        }
        if bytes.is_empty() {
            return Err(ServiceError::Validation("empty file".into()));
        }
        if bytes.len() > self.storage.max_upload_bytes {
            return Err(ServiceError::Validation(format!(
                "file exceeds {} bytes",
                self.storage.max_upload_bytes
            )));
        }
        let ext = normalized_extension(original_name)?;
        let id = Uuid::new_v4();
        let file_name = format!("{id}{ext}");
        let path = self.path_for(&file_name);

        tokio::fs::create_dir_all(&self.storage.upload_dir)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mime_type = content_type
            .filter(|c| c.starts_with("image/"))
            .unwrap_or_else(|| mime_for(&ext))
            .to_string();
        let new_file = NewFile {
            id,
            original_name: original_name.to_string(),
            file_name,
            file_path: path.to_string_lossy().into_owned(),
            file_size: bytes.len() as i64,
            mime_type,
            uploaded_by: uploaded_by.trim().to_string(),
        };

        let txn = transaction::begin(&self.db).await;
        let stored = match txn {
            Ok(txn) => {
                let res = file::create(&txn, new_file).await.map_err(ServiceError::from);
                transaction::finish(txn, res).await
            }
            Err(e) => Err(e),
        };
        match stored {
            Ok(row) => {
                info!(file_id = %row.id, file_name = %row.file_name, "file_uploaded");
                Ok(FileView::new(row, &self.storage.public_path))
            }
            Err(err) => {
                if let Err(rm) = tokio::fs::remove_file(&path).await {
                    warn!(path = %path.display(), error = %rm, "failed to remove file after insert error");
                }
                Err(err)
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<FileView, ServiceError> {
        let found = file::find_by_id(self.db.as_ref(), id).await?.ok_or_else(|| ServiceError::not_found("file"))?;
        Ok(FileView::new(found, &self.storage.public_path))
    }

    pub async fn list_by_uploader(&self, uploaded_by: &str) -> Result<Vec<FileView>, ServiceError> {
        let rows = file::list_by_uploader(self.db.as_ref(), uploaded_by).await?;
        Ok(rows
            .into_iter()
            .map(|f| FileView::new(f, &self.storage.public_path))
            .collect())
    }

    /// Delete the row in a transaction, then the file on disk.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<FileDeleteOutcome, ServiceError> {
        let txn = transaction::begin(&self.db).await?;
        let res = async {
            let found = file::find_by_id(&txn, id).await?.ok_or_else(|| ServiceError::not_found("file"))?;
            file::delete(&txn, id).await?;
            Ok::<_, ServiceError>(found)
        }
        .await;
        let removed_row = transaction::finish(txn, res).await?;

        let path = self.path_for(&removed_row.file_name);
        let physical_removed = match tokio::fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(file_id = %id, path = %path.display(), "file already missing on disk");
                false
            }
            Err(e) => {
                warn!(file_id = %id, path = %path.display(), error = %e, "orphaned file left on disk");
                false
            }
        };
        info!(file_id = %id, physical_removed, "file_deleted");
        Ok(FileDeleteOutcome { id, physical_removed })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use super::*;

    fn storage(dir: &Path) -> StorageConfig {
        StorageConfig {
            upload_dir: dir.to_string_lossy().into_owned(),
            public_path: "/static/images".into(),
            max_upload_bytes: 16,
        }
    }

    fn row(file_name: &str) -> file::Model {
        file::Model {
            id: Uuid::new_v4(),
            original_name: "cat.PNG".into(),
            file_name: file_name.into(),
            file_path: format!("static/images/{file_name}"),
            file_size: 4,
            mime_type: "image/png".into(),
            uploaded_by: "user-1".into(),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn extension_whitelist() {
        assert_eq!(normalized_extension("cat.PNG").unwrap(), ".png");
        assert_eq!(normalized_extension("photo.jpeg").unwrap(), ".jpeg");
        assert_eq!(normalized_extension("noext").unwrap(), ".png");
        assert!(matches!(normalized_extension("script.exe"), Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn upload_writes_file_and_builds_url() {
        let dir = tempfile::tempdir().unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row("abc.png")]])
            .into_connection();
        let svc = FileService::new(db, storage(dir.path()));

        let view = svc.upload("cat.PNG", Some("image/png"), b"\x89PNG", "user-1").await.unwrap();
        assert_eq!(view.url, "/static/images/abc.png");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn failed_insert_removes_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("insert failed".into())])
            .into_connection();
        let svc = FileService::new(db, storage(dir.path()));

        let err = svc.upload("cat.png", None, b"data", "user-1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn oversize_and_empty_uploads_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let svc = FileService::new(db, storage(dir.path()));
        assert!(matches!(svc.upload("a.png", None, &[0u8; 17], "u").await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.upload("a.png", None, &[], "u").await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.upload("a.png", None, b"x", " ").await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_reports_missing_physical_file() {
        let dir = tempfile::tempdir().unwrap();
        let r = row("gone.png");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![r.clone()]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .into_connection();
        let svc = FileService::new(db, storage(dir.path()));

        let outcome = svc.delete(r.id).await.unwrap();
        assert_eq!(outcome, FileDeleteOutcome { id: r.id, physical_removed: false });
    }

    #[tokio::test]
    async fn delete_removes_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let r = row("here.png");
        std::fs::write(dir.path().join("here.png"), b"x").unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![r.clone()]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .into_connection();
        let svc = FileService::new(db, storage(dir.path()));

        assert!(svc.delete(r.id).await.unwrap().physical_removed);
        assert!(!dir.path().join("here.png").exists());
    }
}
