//! Domain service - business logic orchestration
//!
//! Operations are grouped by aggregate: `books`, `shelves`, `goals` and
//! `lookup` (third-party metadata enrichment).

mod books;
mod goals;
mod lookup;
mod shelves;

use super::metadata::{MetadataProvider, NoOpMetadataProvider};
use super::repository::{
    BookRepository, ReadingGoalRepository, ShelfRepository, UniqueViolation,
};
use crate::config::Config;
use crate::contract::{LibraryError, MetadataSource};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// The three metadata sources consulted by lookups
#[derive(Clone)]
pub struct MetadataProviders {
    pub open_library: Arc<dyn MetadataProvider>,
    pub google_books: Arc<dyn MetadataProvider>,
    pub jikan: Arc<dyn MetadataProvider>,
}

impl MetadataProviders {
    /// Every source disabled; lookups always fail
    pub fn disabled() -> Self {
        Self {
            open_library: Arc::new(NoOpMetadataProvider(MetadataSource::OpenLibrary)),
            google_books: Arc::new(NoOpMetadataProvider(MetadataSource::GoogleBooks)),
            jikan: Arc::new(NoOpMetadataProvider(MetadataSource::Jikan)),
        }
    }
}

/// Domain service for the library
pub struct Service {
    books: Arc<dyn BookRepository>,
    shelves: Arc<dyn ShelfRepository>,
    goals: Arc<dyn ReadingGoalRepository>,
    providers: MetadataProviders,
    config: Config,
    /// Fixed calendar date; `None` follows the system clock
    today: Option<NaiveDate>,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        books: Arc<dyn BookRepository>,
        shelves: Arc<dyn ShelfRepository>,
        goals: Arc<dyn ReadingGoalRepository>,
        providers: MetadataProviders,
        config: Config,
    ) -> Self {
        Self {
            books,
            shelves,
            goals,
            providers,
            config,
            today: None,
        }
    }

    /// Pin "today" to a fixed date (progress and statistics depend on it)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Log a storage failure and hide its details from callers
fn internal(err: anyhow::Error) -> LibraryError {
    tracing::error!(error = ?err, "storage operation failed");
    LibraryError::Internal
}

/// A concurrent writer got to a unique value first
fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<UniqueViolation>().is_some()
}
