//! Contract models for the library service
//!
//! These models are transport-agnostic. REST DTOs live in `api::rest::dto`
//! and storage entities in `infra::storage::entity`.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ===== Books =====

/// Reading status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadingStatus {
    #[default]
    ToRead,
    CurrentlyReading,
    Finished,
    /// Did not finish
    Dnf,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 4] = [
        ReadingStatus::ToRead,
        ReadingStatus::CurrentlyReading,
        ReadingStatus::Finished,
        ReadingStatus::Dnf,
    ];

    /// Stable code used on the wire and in storage
    pub fn as_code(self) -> &'static str {
        match self {
            Self::ToRead => "TO_READ",
            Self::CurrentlyReading => "CURRENTLY_READING",
            Self::Finished => "FINISHED",
            Self::Dnf => "DNF",
        }
    }

    /// Human readable label
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ToRead => "To Read",
            Self::CurrentlyReading => "Currently Reading",
            Self::Finished => "Finished",
            Self::Dnf => "Did Not Finish",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown reading status '{}'", s))
    }
}

/// A book in the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    /// ISBN-10, ISBN-13 or `MAL-<id>` for manga; unique when present
    pub isbn: Option<String>,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Free-form publication date as reported by the source ("2019", "2019-04-02", ...)
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub status: ReadingStatus,
    pub finished_date: Option<NaiveDate>,
    /// 1..=5
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a book
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub isbn: Option<String>,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub status: ReadingStatus,
    pub finished_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update of a book; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub status: Option<ReadingStatus>,
    pub finished_date: Option<NaiveDate>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
}

/// Filters for advanced book search. All filters are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSearchCriteria {
    /// Case-insensitive match on title, author or description
    pub search_term: Option<String>,
    pub status: Option<ReadingStatus>,
    /// Case-insensitive substring of the author
    pub author: Option<String>,
    pub min_rating: Option<i32>,
    pub max_rating: Option<i32>,
    /// Compared against the leading year of `published_date`
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub has_isbn: Option<bool>,
}

impl BookSearchCriteria {
    /// Criteria that only matches a free-text term
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }
}

// ===== Paging =====

/// Sortable book columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookSort {
    #[default]
    Title,
    Author,
    CreatedAt,
    UpdatedAt,
    Rating,
    PublishedDate,
    PageCount,
    Status,
    FinishedDate,
    Id,
}

impl FromStr for BookSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "createdat" => Ok(Self::CreatedAt),
            "updatedat" => Ok(Self::UpdatedAt),
            "rating" => Ok(Self::Rating),
            "publisheddate" => Ok(Self::PublishedDate),
            "pagecount" => Ok(Self::PageCount),
            "status" => Ok(Self::Status),
            "finisheddate" => Ok(Self::FinishedDate),
            "id" => Ok(Self::Id),
            _ => Err(format!("cannot sort books by '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else {
            Err(format!("unknown sort direction '{}'", s))
        }
    }
}

/// Page request (0-based page index)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: BookSort,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: BookSort::default(),
            direction: SortDirection::default(),
        }
    }

    pub fn sorted(mut self, sort: BookSort, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total_elements.div_ceil(request.size)
        };
        Self {
            content,
            page_number: request.page,
            page_size: request.size,
            total_elements,
            total_pages,
        }
    }

    pub fn is_first(&self) -> bool {
        self.page_number == 0
    }

    pub fn is_last(&self) -> bool {
        self.page_number + 1 >= self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

// ===== Shelves =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shelf {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A shelf together with the books placed on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfWithBooks {
    pub shelf: Shelf,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewShelf {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

// ===== Reading goals =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingGoal {
    pub id: i64,
    pub target_books: i32,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReadingGoal {
    /// Whether `today` falls inside the goal period (both ends inclusive)
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.start_date <= today && today <= self.end_date
    }

    /// Length of the goal period in days
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Days since the start, clamped to `[0, total_days]`
    pub fn days_elapsed(&self, today: NaiveDate) -> i64 {
        if today < self.start_date {
            0
        } else if today > self.end_date {
            self.total_days()
        } else {
            (today - self.start_date).num_days()
        }
    }

    /// Days until the end; 0 once the goal has expired
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        if today > self.end_date {
            0
        } else {
            (self.end_date - today).num_days()
        }
    }

    /// Whether the period shares at least one day with `[start, end]`
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReadingGoal {
    pub target_books: i32,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingGoalPatch {
    pub target_books: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Progress report for a reading goal
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
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

    /// Target pace
    pub books_per_month: f64,
    pub books_per_week: f64,
    /// Actual pace so far
    pub average_books_per_month: f64,
    pub on_track: bool,

    /// Latest finished books first, at most five
    pub recently_finished: Vec<Book>,
    /// "YYYY-MM" -> books finished that month
    pub monthly_breakdown: BTreeMap<String, i32>,
}

// ===== Statistics =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCount {
    pub author: String,
    pub count: i64,
}

/// Aggregate reading statistics across the whole library
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingStats {
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
    /// Most frequent authors, most books first
    pub top_authors: Vec<AuthorCount>,
    pub books_per_month: f64,
    pub average_pages_per_book: f64,
    pub books_read_by_year: BTreeMap<i32, i64>,
}

// ===== External metadata =====

/// Third-party metadata source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataSource {
    OpenLibrary,
    GoogleBooks,
    Jikan,
}

impl MetadataSource {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::OpenLibrary => "openLibrary",
            Self::GoogleBooks => "google",
            Self::Jikan => "jikan",
        }
    }
}

impl fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Book metadata as returned by a third-party source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    pub source: MetadataSource,
    pub title: Option<String>,
    /// Author names already joined the way the source presents them
    pub author: Option<String>,
    pub description: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub isbn: Option<String>,
    /// Identifier inside the source (MAL id for Jikan)
    pub source_id: Option<String>,
    /// Chapter count (manga only)
    pub chapters: Option<i32>,
}

impl BookMetadata {
    pub fn new(source: MetadataSource) -> Self {
        Self {
            source,
            title: None,
            author: None,
            description: None,
            published_date: None,
            page_count: None,
            thumbnail_url: None,
            isbn: None,
            source_id: None,
            chapters: None,
        }
    }
}

/// One hit in a multi-source search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSearchResult {
    pub source: MetadataSource,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    pub isbn: Option<String>,
    pub source_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSourceSearch {
    pub query: String,
    pub results: Vec<BookSearchResult>,
}
