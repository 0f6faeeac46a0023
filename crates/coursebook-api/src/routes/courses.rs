//! Course catalog API routes.
//!
//! ## Routes
//!
//! - `GET  /all_courses` - List courses, with optional `sort_by` and `domain`
//! - `GET  /all_courses/{course_id}` - Get course detail (no chapters)
//! - `GET  /all_courses/{course_id}/{chapter_id}` - Get one chapter by ordinal
//! - `POST /all_courses/{course_id}/{chapter_id}?Rating={-1|0|1}` - Rate a chapter
//!
//! 404 messages are fixed per endpoint and identical for malformed and
//! absent identifiers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use coursebook_catalog::{CatalogError, CatalogReader, CatalogWriter, Chapter, Rating, SortKey};

use crate::error::{ApiError, ApiErrorBody};
use crate::server::AppState;

/// Sentinel served as the `Rating` of a course that has no cached
/// aggregate. A documented special value, not an error.
pub const NOT_RATED: &str = "Not rated yet";

/// An aggregate rating payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct RatingDto {
    /// Sum of all votes.
    #[serde(rename = "Total")]
    pub total: i64,
    /// Number of votes cast.
    #[serde(rename = "Count")]
    pub count: i64,
}

impl From<Rating> for RatingDto {
    fn from(value: Rating) -> Self {
        Self {
            total: value.total,
            count: value.count,
        }
    }
}

/// A course as returned by the listing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseSummaryResponse {
    /// Course name.
    pub name: String,
    /// Sortable date string.
    pub date: String,
    /// Course description.
    pub description: String,
    /// Category labels.
    pub domain: Vec<String>,
    /// Freshly recomputed aggregate rating.
    #[serde(rename = "Rating")]
    pub rating: RatingDto,
}

/// The `Rating` field of a course detail response: the cached aggregate
/// total, or a sentinel string when nothing is cached.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RatingField {
    /// Cached aggregate total.
    Total(i64),
    /// No aggregate cached yet.
    NotRated(&'static str),
}

/// A course detail response. Chapters are excluded.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    /// Course name.
    pub name: String,
    /// Sortable date string.
    pub date: String,
    /// Course description.
    pub description: String,
    /// Category labels.
    pub domain: Vec<String>,
    /// Cached aggregate total, or `"Not rated yet"`.
    #[serde(rename = "Rating")]
    #[schema(value_type = Object)]
    pub rating: RatingField,
}

/// A chapter response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChapterResponse {
    /// Chapter name.
    pub name: String,
    /// Chapter body content.
    pub text: String,
    /// Chapter rating, absent if the chapter has never been rated.
    #[serde(rename = "Rating", skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingDto>,
}

impl From<Chapter> for ChapterResponse {
    fn from(value: Chapter) -> Self {
        Self {
            name: value.name,
            text: value.text,
            rating: value.rating.map(RatingDto::from),
        }
    }
}

/// Query parameters for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListCoursesParams {
    /// Sort key: `date`, `Rating`, or `name`. Anything else falls back to
    /// the default (date, descending).
    pub sort_by: Option<String>,
    /// Domain label filter.
    pub domain: Option<String>,
}

/// Query parameters for the rating endpoint.
#[derive(Debug, Deserialize)]
pub struct RateChapterParams {
    /// The vote value. Required; validated as an integer in (−2, 2).
    #[serde(rename = "Rating")]
    pub rating: Option<String>,
}

/// Creates course routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/all_courses", get(list_courses))
        .route("/all_courses/:course_id", get(get_course))
        .route(
            "/all_courses/:course_id/:chapter_id",
            get(get_chapter).post(rate_chapter),
        )
}

/// List courses.
///
/// GET /all_courses
#[utoipa::path(
    get,
    path = "/all_courses",
    tag = "courses",
    params(
        ("sort_by" = Option<String>, Query, description = "Sort key: date, Rating, or name"),
        ("domain" = Option<String>, Query, description = "Domain label filter"),
    ),
    responses(
        (status = 200, description = "Courses listed", body = [CourseSummaryResponse]),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn list_courses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListCoursesParams>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(
        sort_by = params.sort_by.as_deref().unwrap_or(""),
        domain = params.domain.as_deref().unwrap_or(""),
        "Listing courses"
    );

    let sort = SortKey::from_param(params.sort_by.as_deref());
    let reader = CatalogReader::new(state.storage());

    let courses = reader
        .list_courses(sort, params.domain.as_deref())
        .await
        .map_err(ApiError::from)?
        .into_iter()
        .map(|course| CourseSummaryResponse {
            name: course.name,
            date: course.date,
            description: course.description,
            domain: course.domain,
            rating: course.rating.into(),
        })
        .collect::<Vec<_>>();

    Ok(Json(courses))
}

/// Get a course by id.
///
/// GET /all_courses/{course_id}
#[utoipa::path(
    get,
    path = "/all_courses/{course_id}",
    tag = "courses",
    params(
        ("course_id" = String, Path, description = "Course identifier"),
    ),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found", body = ApiErrorBody),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(course = %course_id, "Getting course");

    let reader = CatalogReader::new(state.storage());
    let course = reader.get_course(&course_id).await.map_err(|e| match e {
        CatalogError::NotFound { .. } => ApiError::not_found("Course Not Found"),
        other => ApiError::from(other),
    })?;

    Ok(Json(CourseDetailResponse {
        name: course.name,
        date: course.date,
        description: course.description,
        domain: course.domain,
        rating: course
            .rating
            .map_or(RatingField::NotRated(NOT_RATED), |r| {
                RatingField::Total(r.total)
            }),
    }))
}

/// Get a chapter by course id and ordinal position.
///
/// GET /all_courses/{course_id}/{chapter_id}
#[utoipa::path(
    get,
    path = "/all_courses/{course_id}/{chapter_id}",
    tag = "courses",
    params(
        ("course_id" = String, Path, description = "Course identifier"),
        ("chapter_id" = String, Path, description = "Chapter ordinal position"),
    ),
    responses(
        (status = 200, description = "Chapter found", body = ChapterResponse),
        (status = 404, description = "Course or chapter not found", body = ApiErrorBody),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn get_chapter(
    State(state): State<Arc<AppState>>,
    Path((course_id, chapter_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(course = %course_id, chapter = %chapter_id, "Getting chapter");

    let reader = CatalogReader::new(state.storage());
    let chapter = reader
        .get_chapter(&course_id, &chapter_id)
        .await
        .map_err(not_found_on_chapter_path)?;

    Ok(Json(ChapterResponse::from(chapter)))
}

/// Rate a chapter.
///
/// POST /all_courses/{course_id}/{chapter_id}?Rating={-1|0|1}
#[utoipa::path(
    post,
    path = "/all_courses/{course_id}/{chapter_id}",
    tag = "courses",
    params(
        ("course_id" = String, Path, description = "Course identifier"),
        ("chapter_id" = String, Path, description = "Chapter ordinal position"),
        ("Rating" = i64, Query, description = "Vote value: -1, 0, or 1"),
    ),
    responses(
        (status = 200, description = "Chapter rated", body = ChapterResponse),
        (status = 404, description = "Course or chapter not found", body = ApiErrorBody),
        (status = 422, description = "Vote out of range", body = ApiErrorBody),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn rate_chapter(
    State(state): State<Arc<AppState>>,
    Path((course_id, chapter_id)): Path<(String, String)>,
    Query(params): Query<RateChapterParams>,
) -> Result<impl IntoResponse, ApiError> {
    let vote = parse_vote(params.rating.as_deref())?;

    tracing::info!(course = %course_id, chapter = %chapter_id, vote, "Rating chapter");

    let writer = CatalogWriter::new(state.storage());
    let chapter = writer
        .rate_chapter(&course_id, &chapter_id, vote)
        .await
        .map_err(not_found_on_chapter_path)?;

    Ok(Json(ChapterResponse::from(chapter)))
}

/// Parses the `Rating` query value. Missing and non-integer values are
/// validation failures, consistent with out-of-range votes: all are
/// rejected before any store access.
fn parse_vote(raw: Option<&str>) -> Result<i64, ApiError> {
    let raw = raw
        .ok_or_else(|| ApiError::unprocessable_entity("Rating query parameter is required"))?;
    raw.parse()
        .map_err(|_| ApiError::unprocessable_entity("Rating must be an integer"))
}

/// Maps catalog errors for the chapter endpoints, where course and chapter
/// misses carry distinct fixed messages.
fn not_found_on_chapter_path(error: CatalogError) -> ApiError {
    match error {
        CatalogError::NotFound {
            entity: "chapter", ..
        } => ApiError::not_found("Chapter not found"),
        CatalogError::NotFound { .. } => ApiError::not_found("Course not found"),
        other => ApiError::from(other),
    }
}
