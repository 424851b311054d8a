//! Migrator for the credential store schema.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_user;
mod m20240615_000002_widen_user_text;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_user::Migration),
            Box::new(m20240615_000002_widen_user_text::Migration),
        ]
    }
}
