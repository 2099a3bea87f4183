//! Route registration

use super::{handlers, openapi::ApiDoc};
use crate::domain::Service;
use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// Register all REST routes on `router`
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        // Book endpoints
        .route(
            "/api/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route("/api/books/stats", get(handlers::reading_statistics))
        .route("/api/books/search", get(handlers::search_books))
        .route("/api/books/advanced-search", get(handlers::advanced_search))
        .route("/api/books/search/title", get(handlers::lookup_by_title))
        .route("/api/books/search/sources", get(handlers::search_all_sources))
        .route(
            "/api/books/status/{status}",
            get(handlers::list_books_by_status),
        )
        .route(
            "/api/books/isbn/{isbn}",
            post(handlers::create_book_from_isbn),
        )
        .route(
            "/api/books/manga/{mal_id}",
            post(handlers::create_book_from_manga),
        )
        .route(
            "/api/books/{id}",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        // Shelf endpoints
        .route(
            "/api/shelves",
            get(handlers::list_shelves).post(handlers::create_shelf),
        )
        .route(
            "/api/shelves/{id}",
            get(handlers::get_shelf)
                .put(handlers::update_shelf)
                .delete(handlers::delete_shelf),
        )
        .route(
            "/api/shelves/{id}/books/{book_id}",
            post(handlers::add_book_to_shelf).delete(handlers::remove_book_from_shelf),
        )
        // Reading goal endpoints
        .route(
            "/api/goals",
            get(handlers::list_goals).post(handlers::create_goal),
        )
        .route("/api/goals/active", get(handlers::active_goal))
        .route("/api/goals/current", get(handlers::current_goal))
        .route(
            "/api/goals/{id}",
            get(handlers::get_goal)
                .put(handlers::update_goal)
                .delete(handlers::delete_goal),
        )
        .route("/api/goals/{id}/progress", get(handlers::goal_progress))
        // Service endpoints
        .route("/health", get(handlers::health))
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(Extension(service))
}
