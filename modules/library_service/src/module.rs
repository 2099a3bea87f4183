//! Module lifecycle: migrations, wiring and REST registration

use crate::config::Config;
use crate::domain::Service;
use crate::infra::metadata::build_providers;
use crate::infra::storage::{
    Migrator, SeaOrmBookRepository, SeaOrmReadingGoalRepository, SeaOrmShelfRepository,
};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Library service module
pub struct LibraryServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for LibraryServiceModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl LibraryServiceModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
        }
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Library service migrations completed");
        Ok(())
    }

    /// Build repositories, metadata clients and the domain service
    pub fn init(&self, db: Arc<DatabaseConnection>) -> Result<Arc<Service>> {
        let cfg = self.config();

        let books = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let shelves = Arc::new(SeaOrmShelfRepository::new(db.clone()));
        let goals = Arc::new(SeaOrmReadingGoalRepository::new(db));
        let providers = build_providers(&cfg)?;

        let service = Arc::new(Service::new(books, shelves, goals, providers, cfg));
        *self.service.write() = Some(service.clone());

        tracing::info!("Library service initialized");
        Ok(service)
    }

    /// Initialized service, if `init` has run
    pub fn service(&self) -> Option<Arc<Service>> {
        self.service.read().clone()
    }

    /// Mount the REST routes on `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self
            .service()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?;

        tracing::info!("Registering library service REST routes");
        Ok(crate::api::rest::routes::register_routes(router, service))
    }
}
