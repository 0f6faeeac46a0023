//! Bulk import of course records into the store.
//!
//! The seed file is a JSON array of course records without identifiers or
//! ratings. Import assigns a fresh course ID to each record and initializes
//! every course-level and chapter-level rating to `{Total: 0, Count: 0}`,
//! which is the input invariant the rest of the catalog relies on.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use coursebook_core::storage::DocumentStore;
use coursebook_core::CourseId;

use crate::error::{CatalogError, Result};
use crate::model::{Chapter, Course, Rating};
use crate::writer::CatalogWriter;

/// A chapter record as it appears in the seed file.
#[derive(Debug, Deserialize)]
pub struct SeedChapter {
    /// Chapter name.
    pub name: String,
    /// Chapter body content.
    pub text: String,
}

/// A course record as it appears in the seed file.
#[derive(Debug, Deserialize)]
pub struct SeedCourse {
    /// Course name.
    pub name: String,
    /// Sortable date string.
    pub date: String,
    /// Course description.
    pub description: String,
    /// Category labels.
    pub domain: Vec<String>,
    /// Chapter records, in order.
    #[serde(default)]
    pub chapters: Vec<SeedChapter>,
}

/// Reads a seed file and imports its course records.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if an insert
/// fails.
pub async fn seed_from_path(storage: Arc<dyn DocumentStore>, path: &Path) -> Result<usize> {
    let data = std::fs::read(path).map_err(|e| CatalogError::Storage {
        message: format!("failed to read seed file {}: {e}", path.display()),
    })?;

    let records: Vec<SeedCourse> =
        serde_json::from_slice(&data).map_err(|e| CatalogError::Serialization {
            message: format!("malformed seed file {}: {e}", path.display()),
        })?;

    seed_courses(storage, records).await
}

/// Imports course records, initializing all ratings to zero.
///
/// Returns the number of courses inserted.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub async fn seed_courses(
    storage: Arc<dyn DocumentStore>,
    records: Vec<SeedCourse>,
) -> Result<usize> {
    let writer = CatalogWriter::new(storage);
    let count = records.len();

    for record in records {
        let course = Course {
            id: CourseId::generate(),
            name: record.name,
            date: record.date,
            description: record.description,
            domain: record.domain,
            chapters: record
                .chapters
                .into_iter()
                .map(|chapter| Chapter {
                    name: chapter.name,
                    text: chapter.text,
                    rating: Some(Rating::ZERO),
                })
                .collect(),
            rating: Some(Rating::ZERO),
        };
        writer.insert_course(&course).await?;
    }

    tracing::info!(count, "seeded courses");
    Ok(count)
}
