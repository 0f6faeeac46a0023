//! Course, chapter, and rating types.
//!
//! Wire and document field names for ratings are capitalized (`Rating`,
//! `Total`, `Count`); serde renames keep the Rust fields idiomatic.

use serde::{Deserialize, Serialize};

use coursebook_core::CourseId;

/// An aggregate rating: the sum of votes and the number of votes cast.
///
/// Votes are −1, 0, or 1, so `total.abs() <= count` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Sum of all votes.
    #[serde(rename = "Total")]
    pub total: i64,
    /// Number of votes cast.
    #[serde(rename = "Count")]
    pub count: i64,
}

impl Rating {
    /// A zero rating: no votes cast.
    pub const ZERO: Self = Self { total: 0, count: 0 };
}

/// A sub-unit of a course with its own rating.
///
/// Chapters carry no identifier; they are addressed by ordinal position
/// within their course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter name.
    pub name: String,
    /// Chapter body content.
    pub text: String,
    /// Chapter-level rating. Absent on documents that have never been
    /// rated and predate rating-initialized seeding.
    #[serde(rename = "Rating", skip_serializing_if = "Option::is_none", default)]
    pub rating: Option<Rating>,
}

/// A course document as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Store-assigned course identifier.
    pub id: CourseId,
    /// Course name.
    pub name: String,
    /// Sortable date string.
    pub date: String,
    /// Course description.
    pub description: String,
    /// Category labels the course belongs to.
    pub domain: Vec<String>,
    /// Ordered chapter list. Chapters are authoritative for ratings.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    /// Cached course-level rating, recomputed from chapters on the listing
    /// path. A cache only; never the source of truth.
    #[serde(rename = "Rating", skip_serializing_if = "Option::is_none", default)]
    pub rating: Option<Rating>,
}

/// The listing projection of a course: no identifier, no chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    /// Course name.
    pub name: String,
    /// Sortable date string.
    pub date: String,
    /// Course description.
    pub description: String,
    /// Category labels.
    pub domain: Vec<String>,
    /// Freshly recomputed course-level rating.
    #[serde(rename = "Rating")]
    pub rating: Rating,
}

/// Listing sort key.
///
/// A closed enumeration: every request resolves to exactly one of these,
/// and unrecognized `sort_by` values degrade to the default rather than
/// erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Sort by date, descending (the default).
    #[default]
    Date,
    /// Sort by aggregate rating total, descending.
    Rating,
    /// Sort by name, ascending.
    Name,
}

impl SortKey {
    /// Resolves a `sort_by` query value to a sort key.
    ///
    /// Recognizes `date`, `Rating`, and `name` (case-sensitive, matching
    /// the served query contract). Anything else, including an absent
    /// parameter, falls back to [`SortKey::Date`].
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("Rating") => Self::Rating,
            Some("name") => Self::Name,
            _ => Self::Date,
        }
    }
}
