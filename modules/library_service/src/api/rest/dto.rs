//! REST DTOs with serde derives for HTTP API
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

// ===== Book DTOs =====

/// Reading status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadingStatusDto {
    ToRead,
    CurrentlyReading,
    Finished,
    Dnf,
}

/// Book response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: i64,
    #[schema(example = "9780441172719")]
    pub isbn: Option<String>,
    #[schema(example = "Dune")]
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    #[schema(example = "1990-09-01")]
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub status: ReadingStatusDto,
    /// Human readable status ("To Read", "Did Not Finish", ...)
    pub status_display_name: String,
    pub finished_date: Option<NaiveDate>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book create request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    /// 10 or 13 digits, or `MAL-<id>` for manga
    pub isbn: Option<String>,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    pub thumbnail_url: Option<String>,
    /// Defaults to TO_READ
    pub status: Option<ReadingStatusDto>,
    pub finished_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Book update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub status: Option<ReadingStatusDto>,
    pub finished_date: Option<NaiveDate>,
    /// 1 to 5
    pub rating: Option<i32>,
    pub notes: Option<String>,
}

/// One page of books
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPageDto {
    pub content: Vec<BookDto>,
    /// 0-based
    pub page_number: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

// ===== Shelf DTOs =====

/// Shelf with its books
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShelfDto {
    pub id: i64,
    #[schema(example = "Favorites")]
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub book_count: usize,
    pub books: Vec<BookDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShelfRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShelfRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

// ===== Reading Goal DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingGoalDto {
    pub id: i64,
    #[schema(example = 52)]
    pub target_books: i32,
    #[schema(example = 2026)]
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingGoalRequest {
    pub target_books: i32,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReadingGoalRequest {
    pub target_books: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Progress and pace of a reading goal
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressDto {
    pub goal_id: i64,
    pub target_books: i32,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub is_active: bool,
    pub is_current: bool,
    pub books_read: i32,
    pub books_remaining: i32,
    pub percentage_complete: f64,
    pub days_elapsed: i64,
    pub days_remaining: i64,
    pub total_days: i64,
    /// Pace needed to hit the target
    pub books_per_month: f64,
    pub books_per_week: f64,
    /// Pace so far
    pub average_books_per_month: f64,
    pub on_track: bool,
    pub recently_finished: Vec<BookDto>,
    /// "YYYY-MM" -> books finished
    pub monthly_breakdown: BTreeMap<String, i32>,
}

// ===== Statistics DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorCountDto {
    pub author: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStatsDto {
    pub total_books: i64,
    pub books_read: i64,
    pub books_to_read: i64,
    pub currently_reading: i64,
    pub books_did_not_finish: i64,
    pub current_year: i32,
    pub books_read_this_year: i64,
    pub books_added_this_year: i64,
    pub average_rating: f64,
    pub rated_books: i64,
    pub rating_distribution: BTreeMap<i32, i64>,
    pub unique_authors: i64,
    pub top_authors: Vec<AuthorCountDto>,
    pub books_per_month: f64,
    pub average_pages_per_book: f64,
    pub books_read_by_year: BTreeMap<i32, i64>,
}

// ===== Metadata lookup DTOs =====

/// Book found in a metadata source, not yet in the library
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPreviewDto {
    /// openLibrary, google or jikan
    pub source: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub isbn: Option<String>,
    pub source_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSearchResultDto {
    pub source: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    pub isbn: Option<String>,
    pub source_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MultiSourceSearchDto {
    pub query: String,
    pub results: Vec<BookSearchResultDto>,
    pub total_results: usize,
}

// ===== Query parameters =====

/// Paging and filter parameters for the book listing; sortBy is title, author, createdAt, ...
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
    pub status: Option<ReadingStatusDto>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBooksQuery {
    #[serde(default)]
    pub term: String,
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSearchQuery {
    pub term: Option<String>,
    pub status: Option<ReadingStatusDto>,
    pub author: Option<String>,
    pub min_rating: Option<i32>,
    pub max_rating: Option<i32>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub has_isbn: Option<bool>,
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourcesQuery {
    #[serde(default)]
    pub query: String,
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    #[schema(example = "ok")]
    pub status: String,
}
