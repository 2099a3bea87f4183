//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract;

// ===== Status conversions =====

impl From<contract::ReadingStatus> for ReadingStatusDto {
    fn from(status: contract::ReadingStatus) -> Self {
        match status {
            contract::ReadingStatus::ToRead => Self::ToRead,
            contract::ReadingStatus::CurrentlyReading => Self::CurrentlyReading,
            contract::ReadingStatus::Finished => Self::Finished,
            contract::ReadingStatus::Dnf => Self::Dnf,
        }
    }
}

impl From<ReadingStatusDto> for contract::ReadingStatus {
    fn from(status: ReadingStatusDto) -> Self {
        match status {
            ReadingStatusDto::ToRead => Self::ToRead,
            ReadingStatusDto::CurrentlyReading => Self::CurrentlyReading,
            ReadingStatusDto::Finished => Self::Finished,
            ReadingStatusDto::Dnf => Self::Dnf,
        }
    }
}

// ===== Book conversions =====

impl From<contract::Book> for BookDto {
    fn from(book: contract::Book) -> Self {
        Self {
            id: book.id,
            isbn: book.isbn,
            title: book.title,
            author: book.author,
            description: book.description,
            published_date: book.published_date,
            page_count: book.page_count,
            thumbnail_url: book.thumbnail_url,
            status: book.status.into(),
            status_display_name: book.status.display_name().to_string(),
            finished_date: book.finished_date,
            rating: book.rating,
            notes: book.notes,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

impl From<CreateBookRequest> for contract::NewBook {
    fn from(req: CreateBookRequest) -> Self {
        Self {
            isbn: req.isbn,
            title: req.title,
            author: req.author,
            description: req.description,
            published_date: req.published_date,
            page_count: req.page_count,
            thumbnail_url: req.thumbnail_url,
            status: req.status.map(Into::into).unwrap_or_default(),
            finished_date: req.finished_date,
            notes: req.notes,
        }
    }
}

impl From<UpdateBookRequest> for contract::BookPatch {
    fn from(req: UpdateBookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            description: req.description,
            status: req.status.map(Into::into),
            finished_date: req.finished_date,
            rating: req.rating,
            notes: req.notes,
        }
    }
}

impl From<contract::Page<contract::Book>> for BookPageDto {
    fn from(page: contract::Page<contract::Book>) -> Self {
        let first = page.is_first();
        let last = page.is_last();
        let page = page.map(BookDto::from);
        Self {
            content: page.content,
            page_number: page.page_number,
            page_size: page.page_size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            first,
            last,
        }
    }
}

impl From<AdvancedSearchQuery> for contract::BookSearchCriteria {
    fn from(query: AdvancedSearchQuery) -> Self {
        Self {
            search_term: query.term,
            status: query.status.map(Into::into),
            author: query.author,
            min_rating: query.min_rating,
            max_rating: query.max_rating,
            min_year: query.min_year,
            max_year: query.max_year,
            has_isbn: query.has_isbn,
        }
    }
}

// ===== Shelf conversions =====

impl From<contract::ShelfWithBooks> for ShelfDto {
    fn from(view: contract::ShelfWithBooks) -> Self {
        let books: Vec<BookDto> = view.books.into_iter().map(BookDto::from).collect();
        Self {
            id: view.shelf.id,
            name: view.shelf.name,
            description: view.shelf.description,
            created_at: view.shelf.created_at,
            book_count: books.len(),
            books,
        }
    }
}

impl From<CreateShelfRequest> for contract::NewShelf {
    fn from(req: CreateShelfRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

impl From<UpdateShelfRequest> for contract::ShelfPatch {
    fn from(req: UpdateShelfRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

// ===== Reading goal conversions =====

impl From<contract::ReadingGoal> for ReadingGoalDto {
    fn from(goal: contract::ReadingGoal) -> Self {
        Self {
            id: goal.id,
            target_books: goal.target_books,
            year: goal.year,
            start_date: goal.start_date,
            end_date: goal.end_date,
            description: goal.description,
            is_active: goal.is_active,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}

impl From<CreateReadingGoalRequest> for contract::NewReadingGoal {
    fn from(req: CreateReadingGoalRequest) -> Self {
        Self {
            target_books: req.target_books,
            year: req.year,
            start_date: req.start_date,
            end_date: req.end_date,
            description: req.description,
        }
    }
}

impl From<UpdateReadingGoalRequest> for contract::ReadingGoalPatch {
    fn from(req: UpdateReadingGoalRequest) -> Self {
        Self {
            target_books: req.target_books,
            start_date: req.start_date,
            end_date: req.end_date,
            description: req.description,
            is_active: req.is_active,
        }
    }
}

impl From<contract::GoalProgress> for GoalProgressDto {
    fn from(p: contract::GoalProgress) -> Self {
        Self {
            goal_id: p.goal_id,
            target_books: p.target_books,
            year: p.year,
            start_date: p.start_date,
            end_date: p.end_date,
            description: p.description,
            is_active: p.is_active,
            is_current: p.is_current,
            books_read: p.books_read,
            books_remaining: p.books_remaining,
            percentage_complete: p.percentage_complete,
            days_elapsed: p.days_elapsed,
            days_remaining: p.days_remaining,
            total_days: p.total_days,
            books_per_month: p.books_per_month,
            books_per_week: p.books_per_week,
            average_books_per_month: p.average_books_per_month,
            on_track: p.on_track,
            recently_finished: p.recently_finished.into_iter().map(BookDto::from).collect(),
            monthly_breakdown: p.monthly_breakdown,
        }
    }
}

// ===== Statistics conversions =====

impl From<contract::ReadingStats> for ReadingStatsDto {
    fn from(s: contract::ReadingStats) -> Self {
        Self {
            total_books: s.total_books,
            books_read: s.books_read,
            books_to_read: s.books_to_read,
            currently_reading: s.currently_reading,
            books_did_not_finish: s.books_did_not_finish,
            current_year: s.current_year,
            books_read_this_year: s.books_read_this_year,
            books_added_this_year: s.books_added_this_year,
            average_rating: s.average_rating,
            rated_books: s.rated_books,
            rating_distribution: s.rating_distribution,
            unique_authors: s.unique_authors,
            top_authors: s
                .top_authors
                .into_iter()
                .map(|a| AuthorCountDto {
                    author: a.author,
                    count: a.count,
                })
                .collect(),
            books_per_month: s.books_per_month,
            average_pages_per_book: s.average_pages_per_book,
            books_read_by_year: s.books_read_by_year,
        }
    }
}

// ===== Metadata conversions =====

impl From<contract::BookMetadata> for BookPreviewDto {
    fn from(m: contract::BookMetadata) -> Self {
        Self {
            source: m.source.as_code().to_string(),
            title: m.title,
            author: m.author,
            description: m.description,
            published_date: m.published_date,
            page_count: m.page_count,
            thumbnail_url: m.thumbnail_url,
            isbn: m.isbn,
            source_id: m.source_id,
        }
    }
}

impl From<contract::BookSearchResult> for BookSearchResultDto {
    fn from(r: contract::BookSearchResult) -> Self {
        Self {
            source: r.source.as_code().to_string(),
            title: r.title,
            author: r.author,
            description: r.description,
            thumbnail_url: r.thumbnail_url,
            published_date: r.published_date,
            page_count: r.page_count,
            isbn: r.isbn,
            source_id: r.source_id,
        }
    }
}

impl From<contract::MultiSourceSearch> for MultiSourceSearchDto {
    fn from(search: contract::MultiSourceSearch) -> Self {
        let results: Vec<BookSearchResultDto> = search
            .results
            .into_iter()
            .map(BookSearchResultDto::from)
            .collect();
        Self {
            query: search.query,
            total_results: results.len(),
            results,
        }
    }
}
