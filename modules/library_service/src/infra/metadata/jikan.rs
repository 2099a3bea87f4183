//! Jikan (unofficial MyAnimeList) manga API client

use super::{get_json, non_blank, trim_base, RateLimiter};
use crate::contract::{BookMetadata, MetadataSource};
use crate::domain::MetadataProvider;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct JikanSearchResponse {
    #[serde(default)]
    pub data: Vec<JikanManga>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanSingleResponse {
    pub data: Option<JikanManga>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanManga {
    pub mal_id: i64,
    pub title: Option<String>,
    pub title_english: Option<String>,
    #[serde(default)]
    pub authors: Vec<JikanAuthor>,
    pub synopsis: Option<String>,
    pub chapters: Option<i32>,
    pub published: Option<JikanPublished>,
    pub images: Option<JikanImages>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanAuthor {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanPublished {
    /// ISO timestamp, e.g. `1997-07-22T00:00:00+00:00`
    pub from: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanImageUrls {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

impl JikanManga {
    pub fn into_metadata(self) -> BookMetadata {
        let title = non_blank(self.title_english).or_else(|| non_blank(self.title));
        let author = self
            .authors
            .into_iter()
            .next()
            .and_then(|a| non_blank(Some(a.name)));
        let published_date = self
            .published
            .and_then(|p| p.from)
            .map(|from| from.chars().take(10).collect::<String>());
        let thumbnail_url = self.images.and_then(|i| i.jpg).and_then(|jpg| {
            non_blank(jpg.large_image_url).or_else(|| non_blank(jpg.image_url))
        });

        let mut metadata = BookMetadata::new(MetadataSource::Jikan);
        metadata.title = title;
        metadata.author = author;
        metadata.description = non_blank(self.synopsis);
        metadata.published_date = published_date;
        metadata.thumbnail_url = thumbnail_url;
        metadata.isbn = Some(format!("MAL-{}", self.mal_id));
        metadata.source_id = Some(self.mal_id.to_string());
        metadata.chapters = self.chapters;
        metadata
    }
}

/// Jikan API client; requests are spaced by the configured interval
pub struct JikanClient {
    http_client: reqwest::Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl JikanClient {
    pub fn new(http_client: reqwest::Client, base_url: &str, min_interval: Duration) -> Self {
        Self {
            http_client,
            base_url: trim_base(base_url),
            rate_limiter: RateLimiter::new(min_interval),
        }
    }
}

#[async_trait]
impl MetadataProvider for JikanClient {
    fn source(&self) -> MetadataSource {
        MetadataSource::Jikan
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<BookMetadata>> {
        self.rate_limiter.wait().await;

        let url = format!("{}/manga", self.base_url);
        tracing::debug!(title = %title, url = %url, "Querying Jikan API");

        let request = self.http_client.get(&url).query(&[
            ("q", title),
            ("limit", "1"),
            ("order_by", "popularity"),
        ]);
        let response: Option<JikanSearchResponse> =
            get_json(MetadataSource::Jikan, request).await?;

        Ok(response
            .and_then(|r| r.data.into_iter().next())
            .map(JikanManga::into_metadata))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BookMetadata>> {
        self.rate_limiter.wait().await;

        let url = format!("{}/manga/{}", self.base_url, id);
        tracing::debug!(mal_id = %id, url = %url, "Querying Jikan API");

        let response: Option<JikanSingleResponse> =
            get_json(MetadataSource::Jikan, self.http_client.get(&url)).await?;

        Ok(response
            .and_then(|r| r.data)
            .map(JikanManga::into_metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_title_and_large_image_win() {
        let manga: JikanManga = serde_json::from_str(
            r#"{
                "mal_id": 2,
                "title": "Berserk",
                "title_english": "Berserk (English)",
                "authors": [{"name": "Miura, Kentarou"}, {"name": "Studio Gaga"}],
                "synopsis": "Guts, a former mercenary...",
                "chapters": null,
                "published": {"from": "1989-08-25T00:00:00+00:00", "to": null},
                "images": {"jpg": {"image_url": "small.jpg", "large_image_url": "large.jpg"}}
            }"#,
        )
        .unwrap();
        let meta = manga.into_metadata();
        assert_eq!(meta.title.as_deref(), Some("Berserk (English)"));
        assert_eq!(meta.author.as_deref(), Some("Miura, Kentarou"));
        assert_eq!(meta.published_date.as_deref(), Some("1989-08-25"));
        assert_eq!(meta.thumbnail_url.as_deref(), Some("large.jpg"));
        assert_eq!(meta.isbn.as_deref(), Some("MAL-2"));
        assert_eq!(meta.source_id.as_deref(), Some("2"));
    }

    #[test]
    fn falls_back_to_romanized_title_and_normal_image() {
        let manga: JikanManga = serde_json::from_str(
            r#"{
                "mal_id": 13,
                "title": "One Piece",
                "title_english": null,
                "chapters": 1100,
                "images": {"jpg": {"image_url": "normal.jpg"}}
            }"#,
        )
        .unwrap();
        let meta = manga.into_metadata();
        assert_eq!(meta.title.as_deref(), Some("One Piece"));
        assert_eq!(meta.thumbnail_url.as_deref(), Some("normal.jpg"));
        assert_eq!(meta.chapters, Some(1100));
        assert_eq!(meta.author, None);
    }
}
