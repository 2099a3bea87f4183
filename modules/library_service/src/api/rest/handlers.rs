//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::contract::{BookSort, LibraryError, PageRequest, SortDirection};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

type Svc = Extension<Arc<Service>>;

/// Build a page request from query parameters, filling in configured defaults
fn page_request(
    service: &Service,
    page: Option<u64>,
    size: Option<u64>,
    sort_by: Option<&str>,
    direction: Option<&str>,
) -> Result<PageRequest, Problem> {
    let sort = match sort_by.map(str::trim).filter(|s| !s.is_empty()) {
        Some(key) => key
            .parse::<BookSort>()
            .map_err(|e| map_domain_error(LibraryError::validation(e)))?,
        None => BookSort::default(),
    };
    let direction = match direction.map(str::trim).filter(|s| !s.is_empty()) {
        Some(dir) => dir
            .parse::<SortDirection>()
            .map_err(|e| map_domain_error(LibraryError::validation(e)))?,
        None => SortDirection::default(),
    };
    let size = size.unwrap_or(service.config().default_page_size);
    Ok(PageRequest::new(page.unwrap_or(0), size).sorted(sort, direction))
}

// ===== Book Handlers =====

pub async fn create_book(
    Extension(service): Svc,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookDto>), Problem> {
    let book = service
        .create_book(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

pub async fn list_books(
    Extension(service): Svc,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<BookPageDto>, Problem> {
    let page = page_request(
        &service,
        query.page,
        query.size,
        query.sort_by.as_deref(),
        query.direction.as_deref(),
    )?;
    let books = service
        .list_books_page(page, query.status.map(Into::into), query.author)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(books.into()))
}

pub async fn get_book(
    Extension(service): Svc,
    Path(id): Path<i64>,
) -> Result<Json<BookDto>, Problem> {
    let book = service.get_book(id).await.map_err(map_domain_error)?;
    Ok(Json(book.into()))
}

pub async fn update_book(
    Extension(service): Svc,
    Path(id): Path<i64>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<BookDto>, Problem> {
    let book = service
        .update_book(id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(book.into()))
}

pub async fn delete_book(
    Extension(service): Svc,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service.delete_book(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_books_by_status(
    Extension(service): Svc,
    Path(status): Path<ReadingStatusDto>,
) -> Result<Json<Vec<BookDto>>, Problem> {
    let books = service
        .list_books_by_status(status.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(books.into_iter().map(BookDto::from).collect()))
}

pub async fn search_books(
    Extension(service): Svc,
    Query(query): Query<SearchBooksQuery>,
) -> Result<Json<BookPageDto>, Problem> {
    let page = page_request(
        &service,
        query.page,
        query.size,
        query.sort_by.as_deref(),
        query.direction.as_deref(),
    )?;
    let books = service
        .search_books(&query.term, page)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(books.into()))
}

pub async fn advanced_search(
    Extension(service): Svc,
    Query(query): Query<AdvancedSearchQuery>,
) -> Result<Json<BookPageDto>, Problem> {
    let page = page_request(
        &service,
        query.page,
        query.size,
        query.sort_by.as_deref(),
        query.direction.as_deref(),
    )?;
    let books = service
        .advanced_search(query.into(), page)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(books.into()))
}

pub async fn reading_statistics(Extension(service): Svc) -> Result<Json<ReadingStatsDto>, Problem> {
    let stats = service.reading_statistics().await.map_err(map_domain_error)?;
    Ok(Json(stats.into()))
}

// ===== Metadata lookup Handlers =====

/// Create a book from an ISBN or, failing the ISBN shape, a title query
pub async fn create_book_from_isbn(
    Extension(service): Svc,
    Path(query): Path<String>,
) -> Result<(StatusCode, Json<BookDto>), Problem> {
    let book = service
        .create_book_from_query(&query)
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

pub async fn create_book_from_manga(
    Extension(service): Svc,
    Path(mal_id): Path<i64>,
) -> Result<(StatusCode, Json<BookDto>), Problem> {
    let book = service
        .create_book_from_manga_id(mal_id)
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

/// Look a title up without saving it
pub async fn lookup_by_title(
    Extension(service): Svc,
    Query(query): Query<TitleQuery>,
) -> Result<Json<BookPreviewDto>, Problem> {
    let metadata = service
        .lookup_by_title(&query.title)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(metadata.into()))
}

pub async fn search_all_sources(
    Extension(service): Svc,
    Query(query): Query<SourcesQuery>,
) -> Result<Json<MultiSourceSearchDto>, Problem> {
    let search = service
        .search_all_sources(&query.query)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(search.into()))
}

// ===== Shelf Handlers =====

pub async fn create_shelf(
    Extension(service): Svc,
    Json(req): Json<CreateShelfRequest>,
) -> Result<(StatusCode, Json<ShelfDto>), Problem> {
    let shelf = service
        .create_shelf(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(shelf.into())))
}

pub async fn list_shelves(Extension(service): Svc) -> Result<Json<Vec<ShelfDto>>, Problem> {
    let shelves = service.list_shelves().await.map_err(map_domain_error)?;
    Ok(Json(shelves.into_iter().map(ShelfDto::from).collect()))
}

pub async fn get_shelf(
    Extension(service): Svc,
    Path(id): Path<i64>,
) -> Result<Json<ShelfDto>, Problem> {
    let shelf = service.get_shelf(id).await.map_err(map_domain_error)?;
    Ok(Json(shelf.into()))
}

pub async fn update_shelf(
    Extension(service): Svc,
    Path(id): Path<i64>,
    Json(req): Json<UpdateShelfRequest>,
) -> Result<Json<ShelfDto>, Problem> {
    let shelf = service
        .update_shelf(id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(shelf.into()))
}

pub async fn delete_shelf(
    Extension(service): Svc,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service.delete_shelf(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_book_to_shelf(
    Extension(service): Svc,
    Path((id, book_id)): Path<(i64, i64)>,
) -> Result<Json<ShelfDto>, Problem> {
    let shelf = service
        .add_book_to_shelf(id, book_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(shelf.into()))
}

pub async fn remove_book_from_shelf(
    Extension(service): Svc,
    Path((id, book_id)): Path<(i64, i64)>,
) -> Result<Json<ShelfDto>, Problem> {
    let shelf = service
        .remove_book_from_shelf(id, book_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(shelf.into()))
}

// ===== Reading Goal Handlers =====

pub async fn create_goal(
    Extension(service): Svc,
    Json(req): Json<CreateReadingGoalRequest>,
) -> Result<(StatusCode, Json<ReadingGoalDto>), Problem> {
    let goal = service
        .create_goal(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(goal.into())))
}

pub async fn list_goals(Extension(service): Svc) -> Result<Json<Vec<ReadingGoalDto>>, Problem> {
    let goals = service.list_goals().await.map_err(map_domain_error)?;
    Ok(Json(goals.into_iter().map(ReadingGoalDto::from).collect()))
}

pub async fn get_goal(
    Extension(service): Svc,
    Path(id): Path<i64>,
) -> Result<Json<ReadingGoalDto>, Problem> {
    let goal = service.get_goal(id).await.map_err(map_domain_error)?;
    Ok(Json(goal.into()))
}

pub async fn active_goal(Extension(service): Svc) -> Result<Json<ReadingGoalDto>, Problem> {
    let goal = service.active_goal().await.map_err(map_domain_error)?;
    Ok(Json(goal.into()))
}

pub async fn current_goal(Extension(service): Svc) -> Result<Json<ReadingGoalDto>, Problem> {
    let goal = service.current_goal().await.map_err(map_domain_error)?;
    Ok(Json(goal.into()))
}

pub async fn update_goal(
    Extension(service): Svc,
    Path(id): Path<i64>,
    Json(req): Json<UpdateReadingGoalRequest>,
) -> Result<Json<ReadingGoalDto>, Problem> {
    let goal = service
        .update_goal(id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(goal.into()))
}

pub async fn delete_goal(
    Extension(service): Svc,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service.delete_goal(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn goal_progress(
    Extension(service): Svc,
    Path(id): Path<i64>,
) -> Result<Json<GoalProgressDto>, Problem> {
    let progress = service.goal_progress(id).await.map_err(map_domain_error)?;
    Ok(Json(progress.into()))
}

// ===== Misc =====

pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}
