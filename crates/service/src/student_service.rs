use sea_orm::DatabaseConnection;
use tracing::{info, instrument};
use uuid::Uuid;

use models::filters::StudentFilter;
use models::{skill, student, student_skill};

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::transaction;
use crate::views::StudentListItem;

/// Filtered, paginated student listing with each student's skills attached.
#[instrument(skip(db))]
pub async fn list_students(
    db: &DatabaseConnection,
    filter: &StudentFilter,
    pagination: Pagination,
) -> Result<Page<StudentListItem>, ServiceError> {
    let p = pagination.normalize();
    let (rows, total) = student::search(db, filter, p.offset(), p.limit_u64()).await?;

    let ids: Vec<Uuid> = rows.iter().map(|(s, _)| s.id).collect();
    let mut skills = student_skill::skill_names_by_student(db, &ids).await?;

    let items = rows
        .into_iter()
        .map(|(s, u)| {
            let names = skills.remove(&s.id).unwrap_or_default();
            StudentListItem::new(s, u, names)
        })
        .collect();
    Ok(Page::new(items, total, p))
}

pub async fn list_all_students(db: &DatabaseConnection) -> Result<Vec<student::Model>, ServiceError> {
    Ok(student::list_all(db).await?)
}

pub async fn get_student(db: &DatabaseConnection, id: Uuid) -> Result<student::Model, ServiceError> {
    student::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("student"))
}

pub async fn get_student_by_user(db: &DatabaseConnection, user_id: Uuid) -> Result<student::Model, ServiceError> {
    student::find_by_user_id(db, user_id).await?.ok_or_else(|| ServiceError::not_found("student"))
}

#[instrument(skip(db))]
pub async fn update_university(db: &DatabaseConnection, id: Uuid, university: &str) -> Result<student::Model, ServiceError> {
    let txn = transaction::begin(db).await?;
    let res = async { Ok::<_, ServiceError>(student::update_university(&txn, id, university).await?) }.await;
    let updated = transaction::finish(txn, res).await?;
    info!(student_id = %id, "student_updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_student(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = transaction::begin(db).await?;
    let res = async { Ok::<_, ServiceError>(student::delete(&txn, id).await?) }.await;
    transaction::finish(txn, res).await?;
    info!(student_id = %id, "student_deleted");
    Ok(())
}

/// Skills of a student ordered by name.
pub async fn student_skills(db: &DatabaseConnection, id: Uuid) -> Result<Vec<skill::Model>, ServiceError> {
    get_student(db, id).await?;
    Ok(student_skill::skills_of(db, id).await?)
}

fn skill_name(name: &str) -> Result<&str, ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation("skill name required".into()));
    }
    Ok(name)
}

/// Attach a catalog skill by name. Adding an existing pair is a no-op.
#[instrument(skip(db))]
pub async fn add_student_skill(db: &DatabaseConnection, student_id: Uuid, name: &str) -> Result<(), ServiceError> {
    let name = skill_name(name)?;
    let txn = transaction::begin(db).await?;
    let res = async {
        student::find_by_id(&txn, student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("student"))?;
        let sk = skill::find_by_name(&txn, name)
            .await?
            .ok_or_else(|| ServiceError::not_found("skill"))?;
        student_skill::add(&txn, student_id, sk.id).await?;
        Ok::<_, ServiceError>(sk.id)
    }
    .await;
    let skill_id = transaction::finish(txn, res).await?;
    info!(student_id = %student_id, skill_id = %skill_id, "student_skill_added");
    Ok(())
}

/// Detach a skill by name. Removing an absent pair succeeds.
#[instrument(skip(db))]
pub async fn remove_student_skill(db: &DatabaseConnection, student_id: Uuid, name: &str) -> Result<(), ServiceError> {
    let name = skill_name(name)?;
    let txn = transaction::begin(db).await?;
    let res = async {
        student::find_by_id(&txn, student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("student"))?;
        let sk = skill::find_by_name(&txn, name)
            .await?
            .ok_or_else(|| ServiceError::not_found("skill"))?;
        student_skill::remove(&txn, student_id, sk.id).await?;
        Ok::<_, ServiceError>(())
    }
    .await;
    transaction::finish(txn, res).await?;
    info!(student_id = %student_id, "student_skill_removed");
    Ok(())
}
