//! Database migrations for the library service

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_books;
mod m20250101_000002_create_shelves;
mod m20250101_000003_create_reading_goals;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_books::Migration),
            Box::new(m20250101_000002_create_shelves::Migration),
            Box::new(m20250101_000003_create_reading_goals::Migration),
        ]
    }
}
