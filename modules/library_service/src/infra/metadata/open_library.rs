//! OpenLibrary books API client

use super::{get_json, join_names, non_blank, trim_base};
use crate::contract::{BookMetadata, MetadataSource};
use crate::domain::MetadataProvider;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// `jscmd=data` entry for one bibkey
#[derive(Debug, Clone, Deserialize)]
pub struct OpenLibraryBook {
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<OpenLibraryAuthor>,
    pub publish_date: Option<String>,
    pub number_of_pages: Option<i32>,
    pub cover: Option<OpenLibraryCover>,
    pub notes: Option<OpenLibraryText>,
    #[serde(default)]
    pub excerpts: Vec<OpenLibraryExcerpt>,
    /// `/books/OL...M`
    pub key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenLibraryAuthor {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenLibraryCover {
    pub medium: Option<String>,
}

/// Notes come either as plain text or as `{"type": "/type/text", "value": ...}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OpenLibraryText {
    Plain(String),
    Typed { value: String },
}

impl OpenLibraryText {
    fn into_string(self) -> String {
        match self {
            Self::Plain(text) | Self::Typed { value: text } => text,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenLibraryExcerpt {
    pub text: Option<String>,
}

impl OpenLibraryBook {
    pub fn into_metadata(self, isbn: &str) -> BookMetadata {
        let description = non_blank(self.notes.map(OpenLibraryText::into_string))
            .or_else(|| non_blank(self.excerpts.into_iter().next().and_then(|e| e.text)));

        let mut metadata = BookMetadata::new(MetadataSource::OpenLibrary);
        metadata.title = non_blank(self.title);
        metadata.author = join_names(self.authors.into_iter().map(|a| a.name));
        metadata.description = description;
        metadata.published_date = non_blank(self.publish_date);
        metadata.page_count = self.number_of_pages;
        metadata.thumbnail_url = self.cover.and_then(|c| c.medium);
        metadata.isbn = Some(isbn.to_string());
        metadata.source_id = self.key;
        metadata
    }
}

/// OpenLibrary API client (ISBN lookups only)
pub struct OpenLibraryClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenLibraryClient {
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: trim_base(base_url),
        }
    }
}

#[async_trait]
impl MetadataProvider for OpenLibraryClient {
    fn source(&self) -> MetadataSource {
        MetadataSource::OpenLibrary
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookMetadata>> {
        let bibkey = format!("ISBN:{}", isbn);
        let url = format!("{}/api/books", self.base_url);
        tracing::debug!(isbn = %isbn, url = %url, "Querying OpenLibrary API");

        let request = self.http_client.get(&url).query(&[
            ("bibkeys", bibkey.as_str()),
            ("format", "json"),
            ("jscmd", "data"),
        ]);
        let response: Option<HashMap<String, OpenLibraryBook>> =
            get_json(MetadataSource::OpenLibrary, request).await?;

        let found = response
            .and_then(|mut books| books.remove(&bibkey))
            .map(|book| book.into_metadata(isbn));
        if found.is_none() {
            tracing::debug!(isbn = %isbn, "No book found in OpenLibrary");
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_notes_become_description() {
        let book: OpenLibraryBook = serde_json::from_str(
            r#"{
                "title": "The Dispossessed",
                "authors": [{"name": "Ursula K. Le Guin"}],
                "notes": {"type": "/type/text", "value": "First edition."},
                "cover": {"medium": "https://covers.openlibrary.org/b/id/1-M.jpg"}
            }"#,
        )
        .unwrap();
        let meta = book.into_metadata("9780060512750");
        assert_eq!(meta.description.as_deref(), Some("First edition."));
        assert_eq!(
            meta.thumbnail_url.as_deref(),
            Some("https://covers.openlibrary.org/b/id/1-M.jpg")
        );
        assert_eq!(meta.isbn.as_deref(), Some("9780060512750"));
    }

    #[test]
    fn excerpt_is_the_fallback_description() {
        let book: OpenLibraryBook = serde_json::from_str(
            r#"{"title": "Dune", "excerpts": [{"text": "A beginning is a very delicate time."}]}"#,
        )
        .unwrap();
        let meta = book.into_metadata("0441013597");
        assert_eq!(
            meta.description.as_deref(),
            Some("A beginning is a very delicate time.")
        );
        assert_eq!(meta.author, None);
    }
}
