//! Third-party book metadata sources
//!
//! Each source implements the lookups it supports; the others keep the
//! default "not found" answer. Implementations are in infra/metadata.

use crate::contract::{BookMetadata, MetadataSource};
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

/// Source of book metadata (OpenLibrary, Google Books, Jikan)
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Which source this provider talks to
    fn source(&self) -> MetadataSource;

    /// Look a book up by normalized ISBN
    async fn find_by_isbn(&self, _isbn: &str) -> Result<Option<BookMetadata>> {
        Ok(None)
    }

    /// Best match for a title
    async fn find_by_title(&self, _title: &str) -> Result<Option<BookMetadata>> {
        Ok(None)
    }

    /// Look an entry up by the source's own identifier
    async fn find_by_id(&self, _id: &str) -> Result<Option<BookMetadata>> {
        Ok(None)
    }
}

/// Provider used when a source is disabled
pub struct NoOpMetadataProvider(pub MetadataSource);

#[async_trait]
impl MetadataProvider for NoOpMetadataProvider {
    fn source(&self) -> MetadataSource {
        self.0
    }
}

static ISBN: Lazy<Regex> = Lazy::new(|| pattern(r"^\d{10}(\d{3})?$"));
static ISBN_LIKE: Lazy<Regex> = Lazy::new(|| pattern(r"^[0-9\-]+$"));
static VOLUME_SUFFIX: Lazy<Regex> = Lazy::new(|| pattern(r",\s*vol\.?\s*\d+"));

#[allow(clippy::expect_used)]
pub(crate) fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

/// Strip whitespace and hyphens and check for 10 or 13 digits
pub fn normalize_isbn(raw: &str) -> Option<String> {
    let clean: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    ISBN.is_match(&clean).then_some(clean)
}

/// Digits and hyphens only; anything else is treated as a title
pub fn looks_like_isbn(query: &str) -> bool {
    ISBN_LIKE.is_match(query)
}

/// Heuristic manga detection on a title returned by a general book source
pub fn looks_like_manga(title: &str) -> bool {
    let title = title.to_lowercase();
    title.contains("manga")
        || title.contains("vol.")
        || title.contains("vol ")
        || title.contains("volume")
        || VOLUME_SUFFIX.is_match(&title)
        || title.chars().last().is_some_and(|c| c.is_ascii_digit())
}
