//! Domain layer - business logic and services

pub mod metadata;
pub mod progress;
pub mod repository;
pub mod service;
pub mod stats;
pub mod validation;

pub use metadata::{MetadataProvider, NoOpMetadataProvider};
pub use repository::{BookRepository, ReadingGoalRepository, ShelfRepository, UniqueViolation};
pub use service::{MetadataProviders, Service};
