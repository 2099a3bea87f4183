//! Contract error types for the library service
//!
//! These errors are transport-agnostic; `api::rest::error` maps them to
//! HTTP problem responses.

use thiserror::Error;

/// Library service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// Book, shelf or reading goal not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (book, shelf, reading goal)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// State conflict (duplicate shelf name, ...)
    #[error("Conflict: {reason}")]
    Conflict { reason: String },
    /// Request failed validation
    #[error("Validation error: {message}")]
    Validation { message: String },
    /// A book with this ISBN is already in the library
    #[error("Book with ISBN {isbn} already exists")]
    DuplicateIsbn { isbn: String },
    /// No metadata source knows the requested book
    #[error("No book found for '{query}'")]
    LookupFailed { query: String },
    /// Internal error
    #[error("Internal error")]
    Internal,
}

impl LibraryError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }
}
