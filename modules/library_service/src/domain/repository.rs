//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Book, BookSearchCriteria, NewBook, NewReadingGoal, NewShelf, Page, PageRequest, ReadingGoal,
    ReadingStatus, Shelf,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// A write collided with a unique column (ISBN, shelf name, shelf membership)
#[derive(Debug, thiserror::Error)]
#[error("unique constraint violated: {0}")]
pub struct UniqueViolation(pub String);

/// Repository for books
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a new book
    async fn create(&self, book: &NewBook) -> Result<Book>;

    /// Find a book by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>>;

    /// Check whether an ISBN is already used
    async fn exists_by_isbn(&self, isbn: &str) -> Result<bool>;

    /// List every book, ordered by title
    async fn list_all(&self) -> Result<Vec<Book>>;

    /// List books with the given status, ordered by title
    async fn find_by_status(&self, status: ReadingStatus) -> Result<Vec<Book>>;

    /// Page through books matching the criteria
    async fn search(&self, criteria: &BookSearchCriteria, page: &PageRequest) -> Result<Page<Book>>;

    /// Books with the given status finished inside `[start, end]`
    async fn find_finished_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Book>>;

    /// Persist every field of an existing book
    async fn update(&self, book: &Book) -> Result<Book>;

    /// Delete a book and its shelf memberships
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Repository for shelves and shelf membership
#[async_trait]
pub trait ShelfRepository: Send + Sync {
    /// Insert a new shelf
    async fn create(&self, shelf: &NewShelf) -> Result<Shelf>;

    /// Find a shelf by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Shelf>>;

    /// Check whether a shelf name is taken
    async fn exists_by_name(&self, name: &str) -> Result<bool>;

    /// List every shelf, ordered by name
    async fn list_all(&self) -> Result<Vec<Shelf>>;

    /// Persist name and description of an existing shelf
    async fn update(&self, shelf: &Shelf) -> Result<Shelf>;

    /// Delete a shelf and its memberships
    async fn delete(&self, id: i64) -> Result<()>;

    /// Books placed on a shelf, ordered by title
    async fn books_on_shelf(&self, shelf_id: i64) -> Result<Vec<Book>>;

    /// Whether a book is on a shelf
    async fn contains_book(&self, shelf_id: i64, book_id: i64) -> Result<bool>;

    /// Put a book on a shelf
    async fn add_book(&self, shelf_id: i64, book_id: i64) -> Result<()>;

    /// Take a book off a shelf
    async fn remove_book(&self, shelf_id: i64, book_id: i64) -> Result<()>;
}

/// Repository for reading goals
#[async_trait]
pub trait ReadingGoalRepository: Send + Sync {
    /// Insert a new goal with the given active flag
    async fn create(&self, goal: &NewReadingGoal, is_active: bool) -> Result<ReadingGoal>;

    /// Find a goal by id
    async fn find_by_id(&self, id: i64) -> Result<Option<ReadingGoal>>;

    /// List goals, newest first
    async fn list_all(&self) -> Result<Vec<ReadingGoal>>;

    /// The goal flagged active, if any
    async fn find_active(&self) -> Result<Option<ReadingGoal>>;

    /// Goal whose period contains `date`, latest start first
    async fn find_current(&self, date: NaiveDate) -> Result<Option<ReadingGoal>>;

    /// Whether any goal other than `exclude_id` overlaps `[start, end]`
    async fn exists_overlapping(
        &self,
        exclude_id: Option<i64>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool>;

    /// Clear the active flag on every goal except `keep_id`
    async fn deactivate_all_except(&self, keep_id: Option<i64>) -> Result<u64>;

    /// Persist every field of an existing goal
    async fn update(&self, goal: &ReadingGoal) -> Result<ReadingGoal>;

    /// Delete a goal
    async fn delete(&self, id: i64) -> Result<()>;
}
