use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::db::connect;
use crate::errors::ModelError;
use crate::filters::{ProjectFilter, StudentFilter};
use crate::project::{NewProject, Timeline};
use crate::user::Role;
use crate::{business, project, project_skill, skill, student, student_skill, user};

/// Connect and migrate, or `None` when no database is available.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {e}");
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {e}");
        return None;
    }
    Some(db)
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

#[tokio::test]
async fn test_user_email_is_unique() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let email = format!("{}@example.com", unique("dup"));
    let first = user::create(&db, &email, "First", "h".into(), Role::Admin).await?;
    let err = user::create(&db, &email, "Second", "h".into(), Role::Admin).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)));

    user::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_student_skill_links_are_idempotent() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let u = user::create(&db, &format!("{}@example.com", unique("stu")), "Stu", "h".into(), Role::Student).await?;
    let s = student::create(&db, u.id, "MIT").await?;
    let sk = skill::create(&db, &unique("Rust"), "").await?;

    student_skill::add(&db, s.id, sk.id).await?;
    student_skill::add(&db, s.id, sk.id).await?;
    let names = student_skill::skill_names_by_student(&db, &[s.id]).await?;
    assert_eq!(names[&s.id], vec![sk.name.clone()]);

    student_skill::remove(&db, s.id, sk.id).await?;
    student_skill::remove(&db, s.id, sk.id).await?;
    let names = student_skill::skill_names_by_student(&db, &[s.id]).await?;
    assert!(names.get(&s.id).is_none());

    user::Entity::delete_by_id(u.id).exec(&db).await?;
    skill::Entity::delete_by_id(sk.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_student_search_by_university_and_skill() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let uni = unique("Uni");
    let tag = unique("Elixir");
    let sk = skill::create(&db, &tag, "").await?;
    let mut users = vec![];
    for i in 0..3 {
        let u = user::create(&db, &format!("{}@example.com", unique(&format!("s{i}"))), "S", "h".into(), Role::Student).await?;
        let s = student::create(&db, u.id, &uni).await?;
        if i == 0 {
            student_skill::add(&db, s.id, sk.id).await?;
        }
        users.push(u.id);
    }

    let by_uni = StudentFilter { university: Some(uni.to_uppercase()), ..Default::default() };
    let (rows, total) = student::search(&db, &by_uni, 0, 10).await?;
    assert_eq!(total, 3);
    assert_eq!(rows.len(), 3);
    assert!(rows.windows(2).all(|w| w[0].1.email <= w[1].1.email));

    let by_skill = StudentFilter { university: Some(uni.clone()), skill: Some(tag.to_lowercase()), ..Default::default() };
    let (rows, total) = student::search(&db, &by_skill, 0, 10).await?;
    assert_eq!(total, 1);
    assert_eq!(rows.len(), 1);

    for id in users {
        user::Entity::delete_by_id(id).exec(&db).await?;
    }
    skill::Entity::delete_by_id(sk.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_project_search_escapes_wildcards() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let u = user::create(&db, &format!("{}@example.com", unique("biz")), "Biz", "h".into(), Role::Business).await?;
    let b = business::create(&db, u.id, "Acme").await?;
    let marker = unique("mk");
    for name in [format!("{marker} 100% done"), format!("{marker} 1000 done")] {
        project::create(
            &db,
            NewProject {
                name,
                description: String::new(),
                duration: 3,
                timeline: Timeline::Week,
                deliverables: "report".into(),
                created_by: b.id,
            },
        )
        .await?;
    }

    let f = ProjectFilter { search: Some(format!("{marker} 100%")), ..Default::default() };
    let (rows, total) = project::search(&db, &f, 0, 10).await?;
    assert_eq!(total, 1);
    assert!(rows[0].name.contains("100%"));

    let listed = project::list_by_business(&db, b.id).await?;
    assert_eq!(listed.len(), 2);
    let names = project_skill::skill_names_by_project(&db, &[listed[0].id]).await?;
    assert!(names.is_empty());

    // Cascades: user -> business -> projects
    user::Entity::delete_by_id(u.id).exec(&db).await?;
    assert!(project::list_by_business(&db, b.id).await?.is_empty());
    Ok(())
}
