//! Catalog write operations.
//!
//! The writer owns the two mutation paths: create-only course inserts
//! (seeding) and chapter rating votes. A vote rewrites the entire chapter
//! sequence back onto the course document because the store cannot address
//! a single chapter. The write-back is unconditional: two concurrent votes
//! on different chapters of the same course race, and the loser's update
//! is silently dropped. This is a known consistency gap, kept as-is.

use std::sync::Arc;

use coursebook_core::storage::{DocumentStore, WritePrecondition, WriteResult};

use crate::error::{CatalogError, Result};
use crate::model::{Chapter, Course};
use crate::paths::course_key;
use crate::rating;
use crate::reader::{chapter_index, encode_course, fetch_course};

/// Writer for catalog state.
pub struct CatalogWriter {
    storage: Arc<dyn DocumentStore>,
}

impl CatalogWriter {
    /// Creates a new catalog writer over the given store.
    #[must_use]
    pub fn new(storage: Arc<dyn DocumentStore>) -> Self {
        Self { storage }
    }

    /// Inserts a new course document (create-only).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::AlreadyExists`] if a document with the same
    /// course ID is already present.
    pub async fn insert_course(&self, course: &Course) -> Result<()> {
        let key = course_key(&course.id);
        let result = self
            .storage
            .put(&key, encode_course(course)?, WritePrecondition::DoesNotExist)
            .await?;

        match result {
            WriteResult::Success { .. } => Ok(()),
            WriteResult::PreconditionFailed { .. } => Err(CatalogError::AlreadyExists {
                entity: "course",
                id: course.id.to_string(),
            }),
        }
    }

    /// Records a vote against one chapter and returns the updated chapter.
    ///
    /// The vote is validated before any store access; course and chapter
    /// resolution follows the same rules as the reader. The chapter's
    /// rating is accumulated in place (initialized on first vote), and the
    /// whole course document is written back.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for an out-of-range vote and
    /// [`CatalogError::NotFound`] when the course or chapter does not
    /// resolve.
    pub async fn rate_chapter(
        &self,
        course_id: &str,
        chapter_id: &str,
        vote: i64,
    ) -> Result<Chapter> {
        rating::validate_vote(vote)?;

        let mut course = fetch_course(self.storage.as_ref(), course_id).await?;
        let index = chapter_index(&course, chapter_id)?;

        rating::apply_vote(&mut course.chapters[index], vote);

        let key = course_key(&course.id);
        self.storage
            .put(&key, encode_course(&course)?, WritePrecondition::None)
            .await?;

        tracing::info!(course = %course.id, chapter = index, vote, "chapter rated");

        Ok(course.chapters[index].clone())
    }
}
