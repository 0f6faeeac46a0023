//! OpenAPI document generation.

use axum::Json;
use utoipa::OpenApi;

use crate::error::ApiErrorBody;
use crate::routes::courses;

/// OpenAPI document for the Coursebook API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coursebook API",
        description = "Course catalog service: listings, detail, and chapter ratings",
    ),
    paths(
        courses::list_courses,
        courses::get_course,
        courses::get_chapter,
        courses::rate_chapter,
    ),
    components(schemas(
        courses::CourseSummaryResponse,
        courses::CourseDetailResponse,
        courses::ChapterResponse,
        courses::RatingDto,
        ApiErrorBody,
    )),
    tags(
        (name = "courses", description = "Course catalog endpoints"),
    )
)]
pub struct ApiDoc;

/// `GET /openapi.json` handler.
pub async fn get_openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_all_course_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.contains(&"/all_courses".to_string()));
        assert!(paths.contains(&"/all_courses/{course_id}".to_string()));
        assert!(paths.contains(&"/all_courses/{course_id}/{chapter_id}".to_string()));
    }
}
