use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::{business, student, user};

use super::domain::{LoginInput, NewProfile, RegisterInput};
use crate::credentials::{Argon2Hasher, CredentialHasher};
use crate::errors::ServiceError;
use crate::transaction;
use crate::views::UserView;
use crate::DbConn;

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    db: DbConn,
    hasher: Arc<dyn CredentialHasher>,
}

impl AuthService {
    pub fn new(db: impl Into<DbConn>, hasher: Arc<dyn CredentialHasher>) -> Self { Self { db: db.into(), hasher } }

    pub fn with_argon2(db: impl Into<DbConn>) -> Self { Self::new(db, Arc::new(Argon2Hasher)) }

    /// Register a user and its role profile atomically.
    ///
    /// Validation and hashing run first. The user insert and the profile
    /// insert share one transaction, so any failure leaves nothing behind.
    #[instrument(skip(self, input), fields(email = %input.email, role = %input.role))]
    pub async fn register(&self, input: RegisterInput) -> Result<UserView, ServiceError> {
        let (role, profile) = input.validate()?;
        // hash before taking a pooled connection
        let hash = self.hash_password(input.password.clone()).await?;

        let txn = transaction::begin(&self.db).await?;
        let res = async {
            let created = user::create(&txn, input.email.trim(), &input.name, hash, role).await?;
            match &profile {
                NewProfile::Student { university } => {
                    let s = student::create(&txn, created.id, university).await?;
                    debug!(student_id = %s.id, "student profile created");
                }
                NewProfile::Business { company_name } => {
                    let b = business::create(&txn, created.id, company_name).await?;
                    debug!(business_id = %b.id, "business profile created");
                }
                NewProfile::Admin => {}
            }
            Ok::<_, ServiceError>(created)
        }
        .await;
        let created = transaction::finish(txn, res).await?;

        info!(user_id = %created.id, role = %created.role, "user_registered");
        Ok(created.into())
    }

    /// Authenticate by email and password.
    ///
    /// Unknown email is `NotFound`, a wrong password `Unauthorized`; callers
    /// facing the network should not tell the two apart.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<UserView, ServiceError> {
        let found = user::find_by_email(self.db.as_ref(), input.email.trim())
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;

        if !self.verify_password(input.password.clone(), found.password_hash.clone()).await? {
            debug!(user_id = %found.id, "password mismatch");
            return Err(ServiceError::Unauthorized("invalid credentials".into()));
        }

        info!(user_id = %found.id, "user_logged_in");
        Ok(found.into())
    }

    async fn hash_password(&self, password: String) -> Result<String, ServiceError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ServiceError::Hash(e.to_string()))?
    }

    async fn verify_password(&self, password: String, stored: String) -> Result<bool, ServiceError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| ServiceError::Hash(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::user::Role;
    use sea_orm::{DatabaseBackend, DbErr, EntityTrait, MockDatabase};
    use uuid::Uuid;

    use crate::test_support::{get_db, unique};

    /// Deterministic hasher so mock tests stay fast.
    struct PlainHasher;

    impl CredentialHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, ServiceError> { Ok(format!("plain:{password}")) }
        fn verify(&self, password: &str, stored: &str) -> Result<bool, ServiceError> {
            Ok(stored == format!("plain:{password}"))
        }
    }

    struct BrokenHasher;

    impl CredentialHasher for BrokenHasher {
        fn hash(&self, _: &str) -> Result<String, ServiceError> { Err(ServiceError::Hash("no entropy".into())) }
        fn verify(&self, _: &str, _: &str) -> Result<bool, ServiceError> { Ok(false) }
    }

    fn transaction_log(db: DbConn) -> String {
        match Arc::try_unwrap(db) {
            Ok(conn) => format!("{:?}", conn.into_transaction_log()),
            Err(_) => panic!("connection still shared"),
        }
    }

    fn user_row(role: Role, hash: &str) -> user::Model {
        user::Model {
            id: Uuid::new_v4(),
            email: "s@uni.edu".into(),
            name: "Stu".into(),
            password_hash: hash.into(),
            role,
            created_at: Utc::now().into(),
        }
    }

    fn register_input(role: &str) -> RegisterInput {
        RegisterInput {
            email: "s@uni.edu".into(),
            name: "Stu".into(),
            password: "Passw0rd".into(),
            role: role.into(),
            university: Some("MIT".into()),
            company_name: None,
        }
    }

    #[tokio::test]
    async fn register_student_inserts_user_and_profile() {
        let u = user_row(Role::Student, "plain:Passw0rd");
        let s = student::Model { id: Uuid::new_v4(), user_id: u.id, university: "MIT".into() };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![u.clone()]])
            .append_query_results([vec![s]])
            .into_connection();
        let svc = AuthService::new(db, Arc::new(PlainHasher));

        let view = svc.register(register_input("student")).await.unwrap();
        assert_eq!(view.id, u.id);
        assert_eq!(view.role, Role::Student);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("plain:"));
    }

    #[tokio::test]
    async fn register_profile_failure_rolls_back_user_insert() {
        let u = user_row(Role::Student, "plain:Passw0rd");
        let db: DbConn = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![u]])
                .append_query_errors([DbErr::Custom("insert failed".into())])
                .into_connection(),
        );
        let svc = AuthService::new(Arc::clone(&db), Arc::new(PlainHasher));

        let err = svc.register(register_input("student")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
        drop(svc);

        let log = transaction_log(db);
        assert!(log.contains("INSERT INTO"));
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn hash_failure_never_opens_a_transaction() {
        let db: DbConn = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = AuthService::new(Arc::clone(&db), Arc::new(BrokenHasher));

        let err = svc.register(register_input("admin")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Hash(_)));
        drop(svc);
        assert_eq!(transaction_log(db), "[]");
    }

    #[tokio::test]
    async fn register_validation_happens_before_any_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let svc = AuthService::new(db, Arc::new(PlainHasher));
        let mut input = register_input("student");
        input.university = None;
        assert!(matches!(svc.register(input).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn login_distinguishes_unknown_email_and_wrong_password() {
        let u = user_row(Role::Admin, "plain:Passw0rd");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([vec![u.clone()]])
            .append_query_results([vec![u.clone()]])
            .into_connection();
        let svc = AuthService::new(db, Arc::new(PlainHasher));

        let missing = svc.login(LoginInput { email: "x@y.z".into(), password: "Passw0rd".into() }).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let wrong = svc.login(LoginInput { email: u.email.clone(), password: "nope-nope".into() }).await;
        assert!(matches!(wrong, Err(ServiceError::Unauthorized(_))));

        let ok = svc.login(LoginInput { email: u.email.clone(), password: "Passw0rd".into() }).await.unwrap();
        assert_eq!(ok.id, u.id);
    }

    fn fresh_input(email: &str, university: &str) -> RegisterInput {
        RegisterInput {
            email: email.into(),
            name: "First".into(),
            password: "Passw0rd!".into(),
            role: "student".into(),
            university: Some(university.into()),
            company_name: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_and_keeps_first_user() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let svc = AuthService::with_argon2(Arc::clone(&db));
        let email = format!("{}@example.com", unique("dup"));

        let first = svc.register(fresh_input(&email, "MIT")).await?;
        let mut second = fresh_input(&email, "ETH");
        second.name = "Second".into();
        let err = svc.register(second).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let stored = user::find_by_email(&*db, &email).await?.expect("first user kept");
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.name, "First");
        assert_eq!(student::find_by_user_id(&*db, first.id).await?.map(|s| s.university), Some("MIT".into()));

        user::Entity::delete_by_id(first.id).exec(&*db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn failed_profile_insert_leaves_no_user() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let svc = AuthService::with_argon2(Arc::clone(&db));
        let email = format!("{}@example.com", unique("nul"));

        // postgres rejects NUL bytes in text, so the student insert fails after the user insert
        let err = svc.register(fresh_input(&email, "MIT\0")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
        assert!(user::find_by_email(&*db, &email).await?.is_none());
        Ok(())
    }
}
