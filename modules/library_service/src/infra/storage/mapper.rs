//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{book, reading_goal, shelf};
use crate::contract::{Book, NewBook, NewReadingGoal, NewShelf, ReadingGoal, ReadingStatus, Shelf};
use anyhow::anyhow;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};

// ===== Book Conversions =====

impl TryFrom<book::Model> for Book {
    type Error = anyhow::Error;

    fn try_from(entity: book::Model) -> Result<Self, Self::Error> {
        let status: ReadingStatus = entity
            .status
            .parse()
            .map_err(|e: String| anyhow!("book {}: {}", entity.id, e))?;

        Ok(Self {
            id: entity.id,
            isbn: entity.isbn,
            title: entity.title,
            author: entity.author,
            description: entity.description,
            published_date: entity.published_date,
            page_count: entity.page_count,
            thumbnail_url: entity.thumbnail_url,
            status,
            finished_date: entity.finished_date,
            rating: entity.rating,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Convert a batch of rows, failing on the first unreadable one
pub fn to_books(rows: Vec<book::Model>) -> anyhow::Result<Vec<Book>> {
    rows.into_iter().map(Book::try_from).collect()
}

impl From<&NewBook> for book::ActiveModel {
    fn from(new: &NewBook) -> Self {
        let now = Utc::now();
        Self {
            id: NotSet,
            isbn: Set(new.isbn.clone()),
            title: Set(new.title.clone()),
            author: Set(new.author.clone()),
            description: Set(new.description.clone()),
            published_date: Set(new.published_date.clone()),
            page_count: Set(new.page_count),
            thumbnail_url: Set(new.thumbnail_url.clone()),
            status: Set(new.status.as_code().to_string()),
            finished_date: Set(new.finished_date),
            rating: Set(None),
            notes: Set(new.notes.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Every column set; `updated_at` is refreshed
impl From<&Book> for book::ActiveModel {
    fn from(model: &Book) -> Self {
        Self {
            id: Set(model.id),
            isbn: Set(model.isbn.clone()),
            title: Set(model.title.clone()),
            author: Set(model.author.clone()),
            description: Set(model.description.clone()),
            published_date: Set(model.published_date.clone()),
            page_count: Set(model.page_count),
            thumbnail_url: Set(model.thumbnail_url.clone()),
            status: Set(model.status.as_code().to_string()),
            finished_date: Set(model.finished_date),
            rating: Set(model.rating),
            notes: Set(model.notes.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(Utc::now()),
        }
    }
}

// ===== Shelf Conversions =====

impl From<shelf::Model> for Shelf {
    fn from(entity: shelf::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            created_at: entity.created_at,
        }
    }
}

impl From<&NewShelf> for shelf::ActiveModel {
    fn from(new: &NewShelf) -> Self {
        Self {
            id: NotSet,
            name: Set(new.name.clone()),
            description: Set(new.description.clone()),
            created_at: Set(Utc::now()),
        }
    }
}

impl From<&Shelf> for shelf::ActiveModel {
    fn from(model: &Shelf) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Reading Goal Conversions =====

impl From<reading_goal::Model> for ReadingGoal {
    fn from(entity: reading_goal::Model) -> Self {
        Self {
            id: entity.id,
            target_books: entity.target_books,
            year: entity.year,
            start_date: entity.start_date,
            end_date: entity.end_date,
            description: entity.description,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// New goal row with the given active flag
pub fn new_goal(goal: &NewReadingGoal, is_active: bool) -> reading_goal::ActiveModel {
    let now = Utc::now();
    reading_goal::ActiveModel {
        id: NotSet,
        target_books: Set(goal.target_books),
        year: Set(goal.year),
        start_date: Set(goal.start_date),
        end_date: Set(goal.end_date),
        description: Set(goal.description.clone()),
        is_active: Set(is_active),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

impl From<&ReadingGoal> for reading_goal::ActiveModel {
    fn from(model: &ReadingGoal) -> Self {
        Self {
            id: Set(model.id),
            target_books: Set(model.target_books),
            year: Set(model.year),
            start_date: Set(model.start_date),
            end_date: Set(model.end_date),
            description: Set(model.description.clone()),
            is_active: Set(model.is_active),
            created_at: Set(model.created_at),
            updated_at: Set(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> book::Model {
        book::Model {
            id: 1,
            isbn: None,
            title: "Dune".into(),
            author: None,
            description: None,
            published_date: None,
            page_count: None,
            thumbnail_url: None,
            status: status.into(),
            finished_date: None,
            rating: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn status_is_read_case_insensitively() {
        let book = Book::try_from(row("currently_reading")).unwrap();
        assert_eq!(book.status, ReadingStatus::CurrentlyReading);
    }

    #[test]
    fn unknown_status_is_an_error() {
        assert!(Book::try_from(row("LOST")).is_err());
    }
}
