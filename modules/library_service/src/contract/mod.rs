//! Contract layer - transport-agnostic models and errors
//!
//! NO serde derives on models - the REST layer owns the wire format.

pub mod error;
pub mod model;

pub use error::LibraryError;
pub use model::{
    AuthorCount, Book, BookMetadata, BookPatch, BookSearchCriteria, BookSearchResult, BookSort,
    GoalProgress, MetadataSource, MultiSourceSearch, NewBook, NewReadingGoal, NewShelf, Page,
    PageRequest, ReadingGoal, ReadingGoalPatch, ReadingStats, ReadingStatus, Shelf, ShelfPatch,
    ShelfWithBooks, SortDirection,
};
