//! Request validation for books, shelves and reading goals

use crate::contract::{
    BookPatch, BookSearchCriteria, LibraryError, NewBook, NewReadingGoal, NewShelf, PageRequest,
    ReadingGoalPatch, ShelfPatch,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_AUTHOR_LEN: usize = 255;
pub const MAX_BOOK_TEXT_LEN: usize = 2000;
pub const MAX_SHELF_NAME_LEN: usize = 100;
pub const MAX_SHELF_DESCRIPTION_LEN: usize = 500;
pub const MAX_GOAL_DESCRIPTION_LEN: usize = 500;
pub const MIN_GOAL_TARGET: i32 = 1;
pub const MAX_GOAL_TARGET: i32 = 1000;
pub const MIN_GOAL_YEAR: i32 = 2020;
pub const MAX_GOAL_YEAR: i32 = 2100;

static BOOK_ISBN: Lazy<Regex> = Lazy::new(|| super::metadata::pattern(r"^(\d{10}|\d{13}|MAL-\d+)$"));

fn max_len(field: &str, value: Option<&str>, max: usize) -> Result<(), LibraryError> {
    match value {
        Some(v) if v.chars().count() > max => Err(LibraryError::validation(format!(
            "{} must be less than {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

fn not_blank(field: &str, value: &str) -> Result<(), LibraryError> {
    if value.trim().is_empty() {
        return Err(LibraryError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Validate a book ISBN: 10 or 13 digits, or a `MAL-<id>` manga reference
pub fn validate_book_isbn(isbn: &str) -> Result<(), LibraryError> {
    if !BOOK_ISBN.is_match(isbn) {
        return Err(LibraryError::validation(format!(
            "ISBN '{}' must be 10 or 13 digits, or MAL ID for manga",
            isbn
        )));
    }
    Ok(())
}

fn validate_rating(rating: Option<i32>) -> Result<(), LibraryError> {
    match rating {
        Some(r) if !(1..=5).contains(&r) => {
            Err(LibraryError::validation("Rating must be between 1 and 5"))
        }
        _ => Ok(()),
    }
}

/// Validate a new book. Empty ISBN strings are normalized to `None`.
pub fn validate_new_book(book: &mut NewBook) -> Result<(), LibraryError> {
    not_blank("Title", &book.title)?;
    max_len("Title", Some(&book.title), MAX_TITLE_LEN)?;
    max_len("Author name", book.author.as_deref(), MAX_AUTHOR_LEN)?;
    max_len("Description", book.description.as_deref(), MAX_BOOK_TEXT_LEN)?;
    max_len("Notes", book.notes.as_deref(), MAX_BOOK_TEXT_LEN)?;

    if book.isbn.as_deref().is_some_and(|isbn| isbn.trim().is_empty()) {
        book.isbn = None;
    }
    if let Some(isbn) = &book.isbn {
        validate_book_isbn(isbn)?;
    }

    if book.page_count.is_some_and(|p| p < 0) {
        return Err(LibraryError::validation("Page count cannot be negative"));
    }
    Ok(())
}

pub fn validate_book_patch(patch: &BookPatch) -> Result<(), LibraryError> {
    if let Some(title) = &patch.title {
        not_blank("Title", title)?;
    }
    max_len("Title", patch.title.as_deref(), MAX_TITLE_LEN)?;
    max_len("Author", patch.author.as_deref(), MAX_AUTHOR_LEN)?;
    max_len("Description", patch.description.as_deref(), MAX_BOOK_TEXT_LEN)?;
    max_len("Notes", patch.notes.as_deref(), MAX_BOOK_TEXT_LEN)?;
    validate_rating(patch.rating)
}

pub fn validate_search_criteria(criteria: &BookSearchCriteria) -> Result<(), LibraryError> {
    validate_rating(criteria.min_rating)?;
    validate_rating(criteria.max_rating)?;
    if let (Some(min), Some(max)) = (criteria.min_rating, criteria.max_rating) {
        if min > max {
            return Err(LibraryError::validation(
                "minRating cannot be greater than maxRating",
            ));
        }
    }
    if let (Some(min), Some(max)) = (criteria.min_year, criteria.max_year) {
        if min > max {
            return Err(LibraryError::validation(
                "minYear cannot be greater than maxYear",
            ));
        }
    }
    Ok(())
}

pub fn validate_page_request(page: &PageRequest, max_page_size: u64) -> Result<(), LibraryError> {
    if page.size == 0 || page.size > max_page_size {
        return Err(LibraryError::validation(format!(
            "Page size must be between 1 and {}",
            max_page_size
        )));
    }
    // The row offset must fit a signed 64-bit SQL OFFSET
    match page.page.checked_mul(page.size) {
        Some(offset) if offset <= i64::MAX as u64 => Ok(()),
        _ => Err(LibraryError::validation(format!(
            "Page number {} is out of range",
            page.page
        ))),
    }
}

pub fn validate_new_shelf(shelf: &NewShelf) -> Result<(), LibraryError> {
    not_blank("Shelf name", &shelf.name)?;
    max_len("Shelf name", Some(&shelf.name), MAX_SHELF_NAME_LEN)?;
    max_len(
        "Description",
        shelf.description.as_deref(),
        MAX_SHELF_DESCRIPTION_LEN,
    )
}

pub fn validate_shelf_patch(patch: &ShelfPatch) -> Result<(), LibraryError> {
    if let Some(name) = &patch.name {
        not_blank("Shelf name", name)?;
    }
    max_len("Shelf name", patch.name.as_deref(), MAX_SHELF_NAME_LEN)?;
    max_len(
        "Description",
        patch.description.as_deref(),
        MAX_SHELF_DESCRIPTION_LEN,
    )
}

fn validate_target(target: i32) -> Result<(), LibraryError> {
    if target < MIN_GOAL_TARGET {
        return Err(LibraryError::validation("Target must be at least 1 book"));
    }
    if target > MAX_GOAL_TARGET {
        return Err(LibraryError::validation("Target cannot exceed 1000 books"));
    }
    Ok(())
}

/// End date must be strictly after the start date
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), LibraryError> {
    if end <= start {
        return Err(LibraryError::validation("End date must be after start date"));
    }
    Ok(())
}

pub fn validate_new_goal(goal: &NewReadingGoal) -> Result<(), LibraryError> {
    validate_target(goal.target_books)?;
    if goal.year < MIN_GOAL_YEAR {
        return Err(LibraryError::validation("Year must be 2020 or later"));
    }
    if goal.year > MAX_GOAL_YEAR {
        return Err(LibraryError::validation("Year must be before 2100"));
    }
    validate_date_range(goal.start_date, goal.end_date)?;
    max_len(
        "Description",
        goal.description.as_deref(),
        MAX_GOAL_DESCRIPTION_LEN,
    )
}

/// Field-level checks; the merged date range is checked by the service
pub fn validate_goal_patch(patch: &ReadingGoalPatch) -> Result<(), LibraryError> {
    if let Some(target) = patch.target_books {
        validate_target(target)?;
    }
    if let (Some(start), Some(end)) = (patch.start_date, patch.end_date) {
        validate_date_range(start, end)?;
    }
    max_len(
        "Description",
        patch.description.as_deref(),
        MAX_GOAL_DESCRIPTION_LEN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            ..NewBook::default()
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn title_is_required() {
        assert!(validate_new_book(&mut book("   ")).is_err());
        assert!(validate_new_book(&mut book("Dune")).is_ok());
    }

    #[test]
    fn title_length_is_bounded() {
        assert!(validate_new_book(&mut book(&"x".repeat(256))).is_err());
        assert!(validate_new_book(&mut book(&"x".repeat(255))).is_ok());
    }

    #[test]
    fn isbn_formats() {
        for ok in ["0134685997", "9780134685991", "MAL-2"] {
            assert!(validate_book_isbn(ok).is_ok(), "{ok} should be accepted");
        }
        for bad in ["123", "978-0134685991", "MAL-", "ISBN9780134685991"] {
            assert!(validate_book_isbn(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn empty_isbn_becomes_none() {
        let mut b = book("Dune");
        b.isbn = Some(String::new());
        validate_new_book(&mut b).unwrap();
        assert_eq!(b.isbn, None);
    }

    #[test]
    fn rating_range() {
        let patch = BookPatch {
            rating: Some(6),
            ..BookPatch::default()
        };
        assert!(validate_book_patch(&patch).is_err());
        let patch = BookPatch {
            rating: Some(5),
            ..BookPatch::default()
        };
        assert!(validate_book_patch(&patch).is_ok());
    }

    #[test]
    fn goal_bounds() {
        let mut goal = NewReadingGoal {
            target_books: 52,
            year: 2026,
            start_date: day(2026, 1, 1),
            end_date: day(2026, 12, 31),
            description: None,
        };
        assert!(validate_new_goal(&goal).is_ok());

        goal.target_books = 0;
        assert!(validate_new_goal(&goal).is_err());
        goal.target_books = 1001;
        assert!(validate_new_goal(&goal).is_err());

        goal.target_books = 10;
        goal.year = 2019;
        assert!(validate_new_goal(&goal).is_err());

        goal.year = 2026;
        goal.end_date = goal.start_date;
        assert!(validate_new_goal(&goal).is_err());
    }

    #[test]
    fn criteria_ranges_must_be_ordered() {
        let criteria = BookSearchCriteria {
            min_year: Some(2010),
            max_year: Some(2000),
            ..BookSearchCriteria::default()
        };
        assert!(validate_search_criteria(&criteria).is_err());
    }

    #[test]
    fn page_size_is_bounded() {
        assert!(validate_page_request(&PageRequest::new(0, 0), 100).is_err());
        assert!(validate_page_request(&PageRequest::new(0, 101), 100).is_err());
        assert!(validate_page_request(&PageRequest::new(3, 100), 100).is_ok());
    }

    #[test]
    fn page_offset_must_fit() {
        assert!(validate_page_request(&PageRequest::new(u64::MAX, 20), 100).is_err());
        assert!(validate_page_request(&PageRequest::new(u64::MAX / 20, 20), 100).is_err());
        let last = i64::MAX as u64 / 20;
        assert!(validate_page_request(&PageRequest::new(last, 20), 100).is_ok());
    }
}
