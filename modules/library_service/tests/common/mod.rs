//! Common test utilities: in-memory database, fixtures and mock metadata sources
#![allow(dead_code, clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use library_service::config::Config;
use library_service::contract::*;
use library_service::domain::{MetadataProvider, MetadataProviders, Service};
use library_service::infra::storage::{
    SeaOrmBookRepository, SeaOrmReadingGoalRepository, SeaOrmShelfRepository,
};
use library_service::LibraryServiceModule;
use parking_lot::{Mutex, RwLock};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashMap;
use std::sync::Arc;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Date every fixed-clock service treats as "today"
pub fn today() -> NaiveDate {
    day(2026, 6, 15)
}

/// Fresh migrated in-memory SQLite database
pub async fn test_db() -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // A single connection keeps every query on the same in-memory database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    LibraryServiceModule::default().migrate(&db).await.unwrap();
    Arc::new(db)
}

pub async fn service_with(providers: MetadataProviders, config: Config) -> Service {
    let db = test_db().await;
    Service::new(
        Arc::new(SeaOrmBookRepository::new(db.clone())),
        Arc::new(SeaOrmShelfRepository::new(db.clone())),
        Arc::new(SeaOrmReadingGoalRepository::new(db)),
        providers,
        config,
    )
}

/// Service over a fresh database with every metadata source disabled
pub async fn test_service() -> Service {
    service_with(MetadataProviders::disabled(), Config::default())
        .await
        .with_today(today())
}

// ===== Fixtures =====

pub fn new_book(title: &str, author: &str) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: Some(author.to_string()),
        ..NewBook::default()
    }
}

pub fn new_book_with(
    title: &str,
    author: &str,
    isbn: Option<&str>,
    status: ReadingStatus,
    finished_date: Option<NaiveDate>,
) -> NewBook {
    NewBook {
        isbn: isbn.map(String::from),
        status,
        finished_date,
        ..new_book(title, author)
    }
}

pub fn new_goal(target: i32, start: NaiveDate, end: NaiveDate) -> NewReadingGoal {
    NewReadingGoal {
        target_books: target,
        year: start.year(),
        start_date: start,
        end_date: end,
        description: None,
    }
}

pub fn metadata(source: MetadataSource, title: &str, author: &str) -> BookMetadata {
    BookMetadata {
        title: Some(title.to_string()),
        author: Some(author.to_string()),
        ..BookMetadata::new(source)
    }
}

// ===== Mock metadata sources =====

/// Canned metadata source that records every call
pub struct MockProvider {
    source: MetadataSource,
    by_isbn: RwLock<HashMap<String, BookMetadata>>,
    by_title: RwLock<HashMap<String, BookMetadata>>,
    by_id: RwLock<HashMap<String, BookMetadata>>,
    failing: RwLock<bool>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(source: MetadataSource) -> Arc<Self> {
        Arc::new(Self {
            source,
            by_isbn: RwLock::new(HashMap::new()),
            by_title: RwLock::new(HashMap::new()),
            by_id: RwLock::new(HashMap::new()),
            failing: RwLock::new(false),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn with_isbn(&self, isbn: &str, meta: BookMetadata) {
        self.by_isbn.write().insert(isbn.to_string(), meta);
    }

    /// Title lookups match case-insensitively on the whole query
    pub fn with_title(&self, title: &str, meta: BookMetadata) {
        self.by_title.write().insert(title.to_lowercase(), meta);
    }

    pub fn with_id(&self, id: &str, meta: BookMetadata) {
        self.by_id.write().insert(id.to_string(), meta);
    }

    /// Make every lookup return an error
    pub fn fail(&self) {
        *self.failing.write() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn answer(
        &self,
        call: String,
        table: &RwLock<HashMap<String, BookMetadata>>,
        key: &str,
    ) -> anyhow::Result<Option<BookMetadata>> {
        self.calls.lock().push(call);
        if *self.failing.read() {
            anyhow::bail!("{} is down", self.source);
        }
        Ok(table.read().get(key).cloned())
    }
}

#[async_trait]
impl MetadataProvider for MockProvider {
    fn source(&self) -> MetadataSource {
        self.source
    }

    async fn find_by_isbn(&self, isbn: &str) -> anyhow::Result<Option<BookMetadata>> {
        self.answer(format!("isbn:{}", isbn), &self.by_isbn, isbn)
    }

    async fn find_by_title(&self, title: &str) -> anyhow::Result<Option<BookMetadata>> {
        self.answer(format!("title:{}", title), &self.by_title, &title.to_lowercase())
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<BookMetadata>> {
        self.answer(format!("id:{}", id), &self.by_id, id)
    }
}

/// One mock per source
pub struct MockSources {
    pub open_library: Arc<MockProvider>,
    pub google_books: Arc<MockProvider>,
    pub jikan: Arc<MockProvider>,
}

impl MockSources {
    pub fn new() -> Self {
        Self {
            open_library: MockProvider::new(MetadataSource::OpenLibrary),
            google_books: MockProvider::new(MetadataSource::GoogleBooks),
            jikan: MockProvider::new(MetadataSource::Jikan),
        }
    }

    pub fn providers(&self) -> MetadataProviders {
        MetadataProviders {
            open_library: self.open_library.clone(),
            google_books: self.google_books.clone(),
            jikan: self.jikan.clone(),
        }
    }

    pub async fn service(&self) -> Service {
        service_with(self.providers(), Config::default())
            .await
            .with_today(today())
    }
}
