//! Schema migrations against a fresh SQLite database

mod common;

use common::*;
use library_service::infra::storage::Migrator;
use library_service::LibraryServiceModule;
use sea_orm_migration::MigratorTrait;

#[tokio::test]
async fn test_migrations_apply_once_each() {
    print_test_header(
        "test_migrations_apply_once_each",
        &[
            "Every migration is recorded under its own name",
            "Running the migrator again is a no-op",
        ],
    );
    let db = test_db().await;

    Migrator::up(db.as_ref(), None).await.unwrap();
    LibraryServiceModule::default().migrate(&db).await.unwrap();

    let applied = Migrator::get_applied_migrations(db.as_ref()).await.unwrap();
    let names: Vec<&str> = applied.iter().map(|m| m.name()).collect();
    assert_eq!(
        names,
        vec![
            "m20250101_000001_create_books",
            "m20250101_000002_create_shelves",
            "m20250101_000003_create_reading_goals",
        ]
    );
    assert!(Migrator::get_pending_migrations(db.as_ref())
        .await
        .unwrap()
        .is_empty());
}
