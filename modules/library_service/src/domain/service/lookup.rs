use super::Service;
use crate::contract::{
    Book, BookMetadata, BookSearchResult, LibraryError, MetadataSource, MultiSourceSearch,
    NewBook,
};
use crate::domain::metadata::{looks_like_isbn, looks_like_manga, normalize_isbn};
use crate::domain::validation::{MAX_AUTHOR_LEN, MAX_BOOK_TEXT_LEN, MAX_TITLE_LEN};
use tracing::{debug, info, warn};

/// Jikan reports chapters, not pages
const PAGES_PER_CHAPTER: i32 = 20;
const UNKNOWN: &str = "Unknown";

impl Service {
    // ===== Metadata Lookup =====

    /// Look an ISBN up across sources and add the book to the library
    pub async fn create_book_from_isbn(&self, raw: &str) -> Result<Book, LibraryError> {
        let isbn = normalize_isbn(raw).ok_or_else(|| {
            LibraryError::validation(format!("Invalid ISBN format: {}", raw.trim()))
        })?;
        self.ensure_isbn_free(&isbn).await?;

        let metadata = self
            .resolve_isbn(&isbn)
            .await
            .ok_or_else(|| LibraryError::LookupFailed {
                query: isbn.clone(),
            })?;
        info!(isbn = %isbn, source = %metadata.source, "Resolved ISBN");
        self.create_book(to_new_book(metadata, Some(isbn))).await
    }

    /// ISBN lookup for digit/hyphen queries, best title match otherwise
    pub async fn create_book_from_query(&self, query: &str) -> Result<Book, LibraryError> {
        let query = required_query(query)?;
        if looks_like_isbn(query) {
            return self.create_book_from_isbn(query).await;
        }

        let metadata = self
            .resolve_title(query)
            .await
            .ok_or_else(|| LibraryError::LookupFailed {
                query: query.to_string(),
            })?;
        info!(title = %query, source = %metadata.source, "Resolved title");
        self.create_book(to_new_book(metadata, None)).await
    }

    /// Best metadata for a title, without adding it to the library
    pub async fn lookup_by_title(&self, title: &str) -> Result<BookMetadata, LibraryError> {
        let title = required_query(title)?;
        self.resolve_title(title)
            .await
            .ok_or_else(|| LibraryError::LookupFailed {
                query: title.to_string(),
            })
    }

    /// Add a manga by its MyAnimeList id
    pub async fn create_book_from_manga_id(&self, mal_id: i64) -> Result<Book, LibraryError> {
        let isbn = format!("MAL-{}", mal_id);
        self.ensure_isbn_free(&isbn).await?;

        let jikan = &self.providers.jikan;
        let metadata = settle(jikan.source(), jikan.find_by_id(&mal_id.to_string()).await)
            .ok_or_else(|| LibraryError::LookupFailed {
                query: isbn.clone(),
            })?;
        self.create_book(to_new_book(metadata, Some(isbn))).await
    }

    /// One result per answering source; failing sources are skipped.
    /// Only a valid ISBN goes to the ISBN sources, anything else is a title.
    pub async fn search_all_sources(&self, query: &str) -> Result<MultiSourceSearch, LibraryError> {
        let query = required_query(query)?;
        let p = &self.providers;

        let hits = match normalize_isbn(query) {
            Some(isbn) => vec![
                settle(p.open_library.source(), p.open_library.find_by_isbn(&isbn).await),
                settle(p.google_books.source(), p.google_books.find_by_isbn(&isbn).await),
            ],
            None => vec![
                settle(p.google_books.source(), p.google_books.find_by_title(query).await),
                settle(p.jikan.source(), p.jikan.find_by_title(query).await),
            ],
        };

        Ok(MultiSourceSearch {
            query: query.to_string(),
            results: hits.into_iter().flatten().map(to_search_result).collect(),
        })
    }

    /// OpenLibrary, then Google Books with a Jikan detour for manga
    async fn resolve_isbn(&self, isbn: &str) -> Option<BookMetadata> {
        let p = &self.providers;

        if let Some(found) = settle(
            p.open_library.source(),
            p.open_library.find_by_isbn(isbn).await,
        ) {
            return Some(found);
        }

        let google = settle(
            p.google_books.source(),
            p.google_books.find_by_isbn(isbn).await,
        )?;
        if let Some(manga) = self.refine_manga(&google).await {
            return Some(manga);
        }
        Some(google)
    }

    /// Google Books by title with a Jikan detour for manga, then Jikan alone
    async fn resolve_title(&self, title: &str) -> Option<BookMetadata> {
        let p = &self.providers;

        if let Some(google) = settle(
            p.google_books.source(),
            p.google_books.find_by_title(title).await,
        ) {
            if let Some(manga) = self.refine_manga(&google).await {
                return Some(manga);
            }
            return Some(google);
        }

        settle(p.jikan.source(), p.jikan.find_by_title(title).await)
    }

    /// Jikan data for a general-source hit whose title reads like manga
    async fn refine_manga(&self, hit: &BookMetadata) -> Option<BookMetadata> {
        let title = hit.title.as_deref().filter(|t| looks_like_manga(t))?;
        debug!(title = %title, "Title looks like manga, asking Jikan");
        let jikan = &self.providers.jikan;
        settle(jikan.source(), jikan.find_by_title(title).await)
    }
}

fn required_query(query: &str) -> Result<&str, LibraryError> {
    match query.trim() {
        "" => Err(LibraryError::validation("Search query is required")),
        q => Ok(q),
    }
}

/// Treat a source failure like a miss
fn settle(
    source: MetadataSource,
    result: anyhow::Result<Option<BookMetadata>>,
) -> Option<BookMetadata> {
    match result {
        Ok(found) => found,
        Err(err) => {
            warn!(source = %source, error = ?err, "Metadata source failed, skipping");
            None
        }
    }
}

fn clip(value: Option<String>, max: usize) -> Option<String> {
    value.map(|v| {
        if v.chars().count() > max {
            v.chars().take(max).collect()
        } else {
            v
        }
    })
}

/// Shape metadata into a new book; `isbn` overrides the source's own
fn to_new_book(metadata: BookMetadata, isbn: Option<String>) -> NewBook {
    let title = clip(metadata.title, MAX_TITLE_LEN)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Unknown Title".to_string());
    NewBook {
        isbn: isbn.or(metadata.isbn),
        title,
        author: clip(metadata.author, MAX_AUTHOR_LEN),
        description: clip(metadata.description, MAX_BOOK_TEXT_LEN),
        published_date: metadata.published_date,
        page_count: metadata.page_count.filter(|p| *p >= 0),
        thumbnail_url: metadata.thumbnail_url,
        ..NewBook::default()
    }
}

fn to_search_result(metadata: BookMetadata) -> BookSearchResult {
    let mut result = BookSearchResult {
        source: metadata.source,
        title: metadata.title,
        author: metadata.author,
        description: metadata.description,
        thumbnail_url: metadata.thumbnail_url,
        published_date: metadata.published_date,
        page_count: metadata.page_count,
        isbn: metadata.isbn,
        source_id: metadata.source_id,
    };
    match metadata.source {
        MetadataSource::Jikan => {
            if let Some(chapters) = metadata.chapters {
                result.page_count = Some(chapters.saturating_mul(PAGES_PER_CHAPTER));
            }
        }
        MetadataSource::OpenLibrary => {
            result.title.get_or_insert_with(|| UNKNOWN.to_string());
            result.author.get_or_insert_with(|| UNKNOWN.to_string());
        }
        MetadataSource::GoogleBooks => {}
    }
    result
}
