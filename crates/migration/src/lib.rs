//! Migrator owning the `student` table.
//!
//! Every table is created with `IF NOT EXISTS`, so running `Migrator::up`
//! on each startup is a no-op once the schema is in place.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_student;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_student::Migration)]
    }
}
