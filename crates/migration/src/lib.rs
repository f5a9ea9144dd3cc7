//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_users;
mod m20240601_000002_create_students;
mod m20240601_000003_create_businesses;
mod m20240601_000004_create_skills;
mod m20240601_000005_create_projects;
mod m20240601_000006_create_association_tables;
mod m20240601_000007_create_files;
mod m20240601_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_users::Migration),
            Box::new(m20240601_000002_create_students::Migration),
            Box::new(m20240601_000003_create_businesses::Migration),
            Box::new(m20240601_000004_create_skills::Migration),
            Box::new(m20240601_000005_create_projects::Migration),
            Box::new(m20240601_000006_create_association_tables::Migration),
            Box::new(m20240601_000007_create_files::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000008_add_indexes::Migration),
        ]
    }
}
