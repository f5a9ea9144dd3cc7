use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::user::Role;
use crate::{project, project_skill, skill, student, user};

fn user_row(role: Role) -> user::Model {
    user::Model {
        id: Uuid::new_v4(),
        email: "ada@example.com".into(),
        name: "Ada".into(),
        password_hash: "$argon2id$stub".into(),
        role,
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn create_user_returns_inserted_row() {
    let row = user_row(Role::Student);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .into_connection();

    let created = user::create(&db, "ada@example.com", "Ada", "$argon2id$stub".into(), Role::Student)
        .await
        .unwrap();
    assert_eq!(created, row);
}

#[tokio::test]
async fn create_user_rejects_invalid_email_without_touching_db() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let err = user::create(&db, "not-an-email", "Ada", "h".into(), Role::Admin).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn student_requires_university() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let err = student::create(&db, Uuid::new_v4(), "  ").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
}

#[tokio::test]
async fn delete_missing_rows_reports_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 0 }])
        .into_connection();
    let err = skill::delete(&db, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound("skill")));
}

#[tokio::test]
async fn association_add_uses_on_conflict_do_nothing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 0 }])
        .into_connection();
    project_skill::add(&db, Uuid::new_v4(), Uuid::new_v4()).await.unwrap();

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("ON CONFLICT"));
    assert!(log.contains("DO NOTHING"));
}

#[tokio::test]
async fn association_remove_of_absent_pair_succeeds() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 0 }])
        .into_connection();
    project_skill::remove(&db, Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn batched_skill_names_skip_query_for_empty_page() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let map = project_skill::skill_names_by_project(&db, &[]).await.unwrap();
    assert!(map.is_empty());
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn project_create_validates_before_insert() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let input = project::NewProject {
        name: "API".into(),
        description: String::new(),
        duration: 0,
        timeline: project::Timeline::Week,
        deliverables: "docs".into(),
        created_by: Uuid::new_v4(),
    };
    let err = project::create(&db, input).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
}
