//! OpenAPI document with the REST schemas

use super::{dto::*, error::Problem};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Tracker API",
        description = "Books, shelves, reading goals and metadata lookup"
    ),
    components(schemas(
        ReadingStatusDto,
        BookDto,
        CreateBookRequest,
        UpdateBookRequest,
        BookPageDto,
        ShelfDto,
        CreateShelfRequest,
        UpdateShelfRequest,
        ReadingGoalDto,
        CreateReadingGoalRequest,
        UpdateReadingGoalRequest,
        GoalProgressDto,
        AuthorCountDto,
        ReadingStatsDto,
        BookPreviewDto,
        BookSearchResultDto,
        MultiSourceSearchDto,
        HealthDto,
        Problem,
    )),
    tags((name = "library", description = "Personal library tracker"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_book_schema() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.schemas.contains_key("BookDto"));
        assert!(components.schemas.contains_key("Problem"));
    }
}
