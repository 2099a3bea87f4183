//! Integration tests for metadata lookups against mock sources

mod common;

use common::*;
use library_service::contract::*;

const DUNE_ISBN: &str = "9780441172719";

#[tokio::test]
async fn test_isbn_prefers_open_library() {
    print_test_header(
        "test_isbn_prefers_open_library",
        &["An OpenLibrary hit is used as-is and Google Books is not asked"],
    );
    let sources = MockSources::new();
    sources.open_library.with_isbn(
        DUNE_ISBN,
        metadata(MetadataSource::OpenLibrary, "Dune", "Frank Herbert"),
    );
    let service = sources.service().await;

    let book = service
        .create_book_from_isbn("978-0-441-17271-9")
        .await
        .unwrap();
    assert_eq!(book.isbn.as_deref(), Some(DUNE_ISBN));
    assert_eq!(book.title, "Dune");
    assert_eq!(book.status, ReadingStatus::ToRead);
    assert_eq!(sources.open_library.calls(), vec![format!("isbn:{DUNE_ISBN}")]);
    assert!(sources.google_books.calls().is_empty());
}

#[tokio::test]
async fn test_isbn_falls_back_to_google_books() {
    print_test_header(
        "test_isbn_falls_back_to_google_books",
        &["A failing OpenLibrary is skipped; Google Books answers"],
    );
    let sources = MockSources::new();
    sources.open_library.fail();
    let mut google = metadata(MetadataSource::GoogleBooks, "Dune", "Frank Herbert");
    google.page_count = Some(535);
    sources.google_books.with_isbn(DUNE_ISBN, google);
    let service = sources.service().await;

    let book = service.create_book_from_isbn(DUNE_ISBN).await.unwrap();
    assert_eq!(book.page_count, Some(535));
    assert_eq!(sources.google_books.calls().len(), 1);
    // "Dune" does not read like manga
    assert!(sources.jikan.calls().is_empty());
}

#[tokio::test]
async fn test_manga_hit_is_refined_with_jikan() {
    print_test_header(
        "test_manga_hit_is_refined_with_jikan",
        &["A Google Books title that reads like manga is replaced by Jikan data"],
    );
    let sources = MockSources::new();
    let isbn = "9781569319017";
    sources.google_books.with_isbn(
        isbn,
        metadata(MetadataSource::GoogleBooks, "One Piece, Vol. 1", "Eiichiro Oda"),
    );
    let mut manga = metadata(MetadataSource::Jikan, "One Piece", "Oda, Eiichiro");
    manga.isbn = Some("MAL-13".into());
    manga.chapters = Some(1100);
    sources.jikan.with_title("One Piece, Vol. 1", manga);
    let service = sources.service().await;

    let book = service.create_book_from_isbn(isbn).await.unwrap();
    assert_eq!(book.title, "One Piece");
    assert_eq!(book.author.as_deref(), Some("Oda, Eiichiro"));
    // The requested ISBN wins over the MAL reference
    assert_eq!(book.isbn.as_deref(), Some(isbn));
}

#[tokio::test]
async fn test_isbn_errors() {
    print_test_header(
        "test_isbn_errors",
        &[
            "Malformed ISBNs are rejected before any lookup",
            "Known ISBNs are duplicates before any lookup",
            "Unknown ISBNs are LookupFailed and nothing is saved",
        ],
    );
    let sources = MockSources::new();
    let service = sources.service().await;

    assert!(matches!(
        service.create_book_from_isbn("123-45").await,
        Err(LibraryError::Validation { .. })
    ));
    assert!(sources.open_library.calls().is_empty());

    let missing = service.create_book_from_isbn(DUNE_ISBN).await.unwrap_err();
    assert_eq!(
        missing,
        LibraryError::LookupFailed {
            query: DUNE_ISBN.into()
        }
    );
    assert!(service.list_books().await.unwrap().is_empty());

    service
        .create_book(new_book_with(
            "Dune",
            "Frank Herbert",
            Some(DUNE_ISBN),
            ReadingStatus::ToRead,
            None,
        ))
        .await
        .unwrap();
    let calls_before = sources.open_library.calls().len();
    assert!(matches!(
        service.create_book_from_isbn(DUNE_ISBN).await,
        Err(LibraryError::DuplicateIsbn { .. })
    ));
    assert_eq!(sources.open_library.calls().len(), calls_before);
}

#[tokio::test]
async fn test_query_dispatches_on_shape() {
    print_test_header(
        "test_query_dispatches_on_shape",
        &["Digit/hyphen queries are ISBNs, anything else is a title"],
    );
    let sources = MockSources::new();
    let mut hit = metadata(MetadataSource::GoogleBooks, "The Left Hand of Darkness", "Ursula K. Le Guin");
    hit.isbn = Some("9780441478125".into());
    sources.google_books.with_title("left hand of darkness", hit);
    sources.open_library.with_isbn(
        DUNE_ISBN,
        metadata(MetadataSource::OpenLibrary, "Dune", "Frank Herbert"),
    );
    let service = sources.service().await;

    let by_title = service
        .create_book_from_query("Left Hand of Darkness")
        .await
        .unwrap();
    assert_eq!(by_title.isbn.as_deref(), Some("9780441478125"));

    let by_isbn = service.create_book_from_query(DUNE_ISBN).await.unwrap();
    assert_eq!(by_isbn.title, "Dune");

    assert!(matches!(
        service.create_book_from_query(" ").await,
        Err(LibraryError::Validation { .. })
    ));
    assert!(matches!(
        service.create_book_from_query("Nonexistent Book").await,
        Err(LibraryError::LookupFailed { .. })
    ));
}

#[tokio::test]
async fn test_title_lookup_falls_back_to_jikan_and_does_not_save() {
    print_test_header(
        "test_title_lookup_falls_back_to_jikan_and_does_not_save",
        &["Jikan answers when Google Books has nothing; previews are not persisted"],
    );
    let sources = MockSources::new();
    sources
        .jikan
        .with_title("berserk", metadata(MetadataSource::Jikan, "Berserk", "Miura, Kentarou"));
    let service = sources.service().await;

    let preview = service.lookup_by_title("Berserk").await.unwrap();
    assert_eq!(preview.source, MetadataSource::Jikan);
    assert_eq!(preview.title.as_deref(), Some("Berserk"));
    assert!(service.list_books().await.unwrap().is_empty());
    assert_eq!(sources.google_books.calls(), vec!["title:Berserk".to_string()]);
}

#[tokio::test]
async fn test_manga_by_mal_id() {
    print_test_header(
        "test_manga_by_mal_id",
        &["Manga are stored under MAL-<id>; a second import is a duplicate"],
    );
    let sources = MockSources::new();
    let mut manga = metadata(MetadataSource::Jikan, "Monster", "Urasawa, Naoki");
    manga.isbn = Some("MAL-1".into());
    manga.source_id = Some("1".into());
    sources.jikan.with_id("1", manga);
    let service = sources.service().await;

    let book = service.create_book_from_manga_id(1).await.unwrap();
    assert_eq!(book.isbn.as_deref(), Some("MAL-1"));
    assert_eq!(book.title, "Monster");

    assert!(matches!(
        service.create_book_from_manga_id(1).await,
        Err(LibraryError::DuplicateIsbn { .. })
    ));
    assert_eq!(sources.jikan.calls(), vec!["id:1".to_string()]);

    assert!(matches!(
        service.create_book_from_manga_id(2).await,
        Err(LibraryError::LookupFailed { .. })
    ));
}

#[tokio::test]
async fn test_missing_title_gets_placeholder() {
    print_test_header(
        "test_missing_title_gets_placeholder",
        &["Metadata without a title is saved as 'Unknown Title'"],
    );
    let sources = MockSources::new();
    sources
        .open_library
        .with_isbn(DUNE_ISBN, BookMetadata::new(MetadataSource::OpenLibrary));
    let service = sources.service().await;

    let book = service.create_book_from_isbn(DUNE_ISBN).await.unwrap();
    assert_eq!(book.title, "Unknown Title");
}

#[tokio::test]
async fn test_search_all_sources() {
    print_test_header(
        "test_search_all_sources",
        &[
            "ISBN queries ask OpenLibrary and Google Books",
            "Title queries ask Google Books and Jikan; failures are skipped",
        ],
    );
    let sources = MockSources::new();
    sources.open_library.with_isbn(
        DUNE_ISBN,
        BookMetadata::new(MetadataSource::OpenLibrary),
    );
    sources.google_books.with_isbn(
        DUNE_ISBN,
        metadata(MetadataSource::GoogleBooks, "Dune", "Frank Herbert"),
    );
    let mut naruto = metadata(MetadataSource::Jikan, "Naruto", "Kishimoto, Masashi");
    naruto.chapters = Some(700);
    sources.jikan.with_title("naruto", naruto);
    sources.google_books.with_title(
        "naruto",
        metadata(MetadataSource::GoogleBooks, "Naruto, Vol. 1", "Masashi Kishimoto"),
    );
    let service = sources.service().await;

    let by_isbn = service.search_all_sources(DUNE_ISBN).await.unwrap();
    let found: Vec<MetadataSource> = by_isbn.results.iter().map(|r| r.source).collect();
    assert_eq!(found, vec![MetadataSource::OpenLibrary, MetadataSource::GoogleBooks]);
    assert_eq!(by_isbn.results[0].title.as_deref(), Some("Unknown"));
    assert!(sources.jikan.calls().is_empty());

    let by_title = service.search_all_sources("Naruto").await.unwrap();
    assert_eq!(by_title.query, "Naruto");
    assert_eq!(by_title.results.len(), 2);
    assert_eq!(by_title.results[1].page_count, Some(14000));

    sources.google_books.fail();
    let degraded = service.search_all_sources("Naruto").await.unwrap();
    assert_eq!(degraded.results.len(), 1);
    assert_eq!(degraded.results[0].source, MetadataSource::Jikan);

    let invalid = service.search_all_sources("12-34").await.unwrap();
    assert!(invalid.results.is_empty());
    assert_eq!(sources.jikan.calls().last().map(String::as_str), Some("title:12-34"));
}

#[tokio::test]
async fn test_search_all_sources_numeric_title() {
    print_test_header(
        "test_search_all_sources_numeric_title",
        &["Digit-only queries that are not valid ISBNs are searched as titles"],
    );
    let sources = MockSources::new();
    sources.google_books.with_title(
        "1984",
        metadata(MetadataSource::GoogleBooks, "1984", "George Orwell"),
    );
    let service = sources.service().await;

    let found = service.search_all_sources("1984").await.unwrap();
    assert_eq!(found.results.len(), 1);
    assert_eq!(found.results[0].title.as_deref(), Some("1984"));
    assert_eq!(sources.google_books.calls(), vec!["title:1984".to_string()]);
    assert_eq!(sources.jikan.calls(), vec!["title:1984".to_string()]);
    assert!(sources.open_library.calls().is_empty());
}
