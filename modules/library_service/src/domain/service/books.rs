use super::{internal, is_unique_violation, Service};
use crate::contract::{
    Book, BookPatch, BookSearchCriteria, LibraryError, NewBook, Page, PageRequest, ReadingStats,
    ReadingStatus,
};
use crate::domain::stats::compute_stats;
use crate::domain::validation;
use tracing::info;

impl Service {
    // ===== Book Operations =====

    /// Add a book by hand
    pub async fn create_book(&self, mut new: NewBook) -> Result<Book, LibraryError> {
        validation::validate_new_book(&mut new)?;

        if let Some(isbn) = &new.isbn {
            self.ensure_isbn_free(isbn).await?;
        }
        if new.status == ReadingStatus::Finished && new.finished_date.is_none() {
            new.finished_date = Some(self.today());
        }

        let book = self.books.create(&new).await.map_err(|err| match &new.isbn {
            Some(isbn) if is_unique_violation(&err) => LibraryError::DuplicateIsbn {
                isbn: isbn.clone(),
            },
            _ => internal(err),
        })?;
        info!(book_id = book.id, title = %book.title, "Created book");
        Ok(book)
    }

    pub async fn get_book(&self, id: i64) -> Result<Book, LibraryError> {
        self.books
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| LibraryError::not_found("book", id))
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, LibraryError> {
        self.books.list_all().await.map_err(internal)
    }

    pub async fn list_books_by_status(
        &self,
        status: ReadingStatus,
    ) -> Result<Vec<Book>, LibraryError> {
        self.books.find_by_status(status).await.map_err(internal)
    }

    /// Paged listing, optionally filtered by status or else by author
    pub async fn list_books_page(
        &self,
        page: PageRequest,
        status: Option<ReadingStatus>,
        author: Option<String>,
    ) -> Result<Page<Book>, LibraryError> {
        validation::validate_page_request(&page, self.config.max_page_size)?;

        let criteria = match (status, author) {
            (Some(status), _) => BookSearchCriteria {
                status: Some(status),
                ..BookSearchCriteria::default()
            },
            (None, Some(author)) if !author.trim().is_empty() => BookSearchCriteria {
                author: Some(author),
                ..BookSearchCriteria::default()
            },
            _ => BookSearchCriteria::default(),
        };
        self.books.search(&criteria, &page).await.map_err(internal)
    }

    /// Apply the provided fields to a book
    pub async fn update_book(&self, id: i64, patch: BookPatch) -> Result<Book, LibraryError> {
        validation::validate_book_patch(&patch)?;
        let mut book = self.get_book(id).await?;

        if let Some(title) = patch.title {
            book.title = title;
        }
        if let Some(author) = patch.author {
            book.author = Some(author);
        }
        if let Some(description) = patch.description {
            book.description = Some(description);
        }
        if let Some(status) = patch.status {
            book.status = status;
        }
        if let Some(finished_date) = patch.finished_date {
            book.finished_date = Some(finished_date);
        }
        if let Some(rating) = patch.rating {
            book.rating = Some(rating);
        }
        if let Some(notes) = patch.notes {
            book.notes = Some(notes);
        }

        if patch.status == Some(ReadingStatus::Finished) && book.finished_date.is_none() {
            book.finished_date = Some(self.today());
        }

        let book = self.books.update(&book).await.map_err(internal)?;
        info!(book_id = book.id, status = %book.status, "Updated book");
        Ok(book)
    }

    /// Delete a book; it also disappears from every shelf
    pub async fn delete_book(&self, id: i64) -> Result<(), LibraryError> {
        self.get_book(id).await?;
        self.books.delete(id).await.map_err(internal)?;
        info!(book_id = id, "Deleted book");
        Ok(())
    }

    /// Case-insensitive match on title, author and description
    pub async fn search_books(
        &self,
        term: &str,
        page: PageRequest,
    ) -> Result<Page<Book>, LibraryError> {
        validation::validate_page_request(&page, self.config.max_page_size)?;
        let criteria = match term.trim() {
            "" => BookSearchCriteria::default(),
            term => BookSearchCriteria::term(term),
        };
        self.books.search(&criteria, &page).await.map_err(internal)
    }

    pub async fn advanced_search(
        &self,
        criteria: BookSearchCriteria,
        page: PageRequest,
    ) -> Result<Page<Book>, LibraryError> {
        validation::validate_search_criteria(&criteria)?;
        validation::validate_page_request(&page, self.config.max_page_size)?;
        self.books.search(&criteria, &page).await.map_err(internal)
    }

    pub async fn reading_statistics(&self) -> Result<ReadingStats, LibraryError> {
        let books = self.list_books().await?;
        Ok(compute_stats(&books, self.today()))
    }

    pub(super) async fn ensure_isbn_free(&self, isbn: &str) -> Result<(), LibraryError> {
        if self.books.exists_by_isbn(isbn).await.map_err(internal)? {
            return Err(LibraryError::DuplicateIsbn {
                isbn: isbn.to_string(),
            });
        }
        Ok(())
    }
}
