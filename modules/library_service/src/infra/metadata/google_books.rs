//! Google Books volumes API client

use super::{get_json, join_names, non_blank, trim_base};
use crate::contract::{BookMetadata, MetadataSource};
use crate::domain::MetadataProvider;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub id: Option<String>,
    #[serde(rename = "volumeInfo")]
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    pub image_links: Option<ImageLinks>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

impl Volume {
    pub fn into_metadata(self) -> Option<BookMetadata> {
        let info = self.volume_info?;

        // Prefer ISBN-13 over ISBN-10; other identifier kinds are not ISBNs
        let isbn = ["ISBN_13", "ISBN_10"].iter().find_map(|kind| {
            info.industry_identifiers
                .iter()
                .find(|id| id.kind == *kind)
                .map(|id| id.identifier.clone())
        });

        let mut metadata = BookMetadata::new(MetadataSource::GoogleBooks);
        metadata.title = non_blank(info.title);
        metadata.author = join_names(info.authors);
        metadata.description = non_blank(info.description);
        metadata.published_date = non_blank(info.published_date);
        metadata.page_count = info.page_count;
        metadata.thumbnail_url = info.image_links.and_then(|l| l.thumbnail);
        metadata.isbn = isbn;
        metadata.source_id = self.id;
        Some(metadata)
    }
}

/// Google Books API client
pub struct GoogleBooksClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    pub fn new(http_client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http_client,
            base_url: trim_base(base_url),
            api_key,
        }
    }

    /// First volume matching a `q=` expression
    async fn first_volume(&self, q: &str) -> Result<Option<BookMetadata>> {
        let url = format!("{}/volumes", self.base_url);
        tracing::debug!(q = %q, url = %url, "Querying Google Books API");

        let mut request = self.http_client.get(&url).query(&[("q", q)]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response: Option<VolumesResponse> =
            get_json(MetadataSource::GoogleBooks, request).await?;
        Ok(response
            .and_then(|r| r.items.into_iter().next())
            .and_then(Volume::into_metadata))
    }
}

#[async_trait]
impl MetadataProvider for GoogleBooksClient {
    fn source(&self) -> MetadataSource {
        MetadataSource::GoogleBooks
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookMetadata>> {
        let mut found = self.first_volume(&format!("isbn:{}", isbn)).await?;
        if let Some(metadata) = found.as_mut() {
            metadata.isbn = Some(isbn.to_string());
        }
        Ok(found)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<BookMetadata>> {
        self.first_volume(&format!("intitle:{}", title)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_volume_info_is_mapped() {
        let response: VolumesResponse = serde_json::from_str(
            r#"{
                "totalItems": 1,
                "items": [{
                    "id": "B1hSG45JCX4C",
                    "volumeInfo": {
                        "title": "Dune",
                        "authors": ["Frank Herbert", "Brian Herbert"],
                        "publishedDate": "1990-09-01",
                        "pageCount": 535,
                        "imageLinks": {"thumbnail": "http://books.google.com/thumb"},
                        "industryIdentifiers": [
                            {"type": "ISBN_10", "identifier": "0441172717"},
                            {"type": "ISBN_13", "identifier": "9780441172719"}
                        ]
                    }
                }]
            }"#,
        )
        .unwrap();
        let meta = response.items.into_iter().next().unwrap().into_metadata().unwrap();
        assert_eq!(meta.author.as_deref(), Some("Frank Herbert, Brian Herbert"));
        assert_eq!(meta.isbn.as_deref(), Some("9780441172719"));
        assert_eq!(meta.page_count, Some(535));
        assert_eq!(meta.thumbnail_url.as_deref(), Some("http://books.google.com/thumb"));
    }

    #[test]
    fn empty_result_has_no_items() {
        let response: VolumesResponse = serde_json::from_str(r#"{"totalItems": 0}"#).unwrap();
        assert!(response.items.is_empty());
    }
}
