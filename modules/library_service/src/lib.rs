//! Library Service Module
//!
//! Personal library tracker: books with reading status, shelves, reading
//! goals with progress tracking, and metadata enrichment from Google Books,
//! OpenLibrary and Jikan.

// Public exports
pub mod contract;
pub use contract::{
    Book, LibraryError, NewBook, ReadingGoal, ReadingStatus, Shelf, ShelfWithBooks,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::LibraryServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
