//! Document key layout for the course store.
//!
//! All course documents live under a single prefix so a listing is one
//! prefix scan. Keys embed the course ULID, which sorts by creation time,
//! so a key-ordered scan is also insertion-ordered.

use coursebook_core::CourseId;

/// Key prefix for all course documents.
pub const COURSE_PREFIX: &str = "courses/";

/// Returns the store key for a course document.
#[must_use]
pub fn course_key(id: &CourseId) -> String {
    format!("{COURSE_PREFIX}{id}.json")
}
