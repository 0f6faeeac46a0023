//! Catalog read operations.
//!
//! The reader resolves course and chapter lookups and serves the listing
//! query. Listing refreshes every course's aggregate rating from its
//! chapters and persists the result before sorting, so a sort by rating
//! reflects current votes and the cached aggregate stays consistent for
//! other readers. The single-course path serves the cached aggregate
//! as-is.

use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;

use coursebook_core::storage::{DocumentStore, WritePrecondition};
use coursebook_core::CourseId;

use crate::error::{CatalogError, Result};
use crate::model::{Chapter, Course, CourseSummary, SortKey};
use crate::paths::{course_key, COURSE_PREFIX};
use crate::rating;

/// Reader for catalog state.
pub struct CatalogReader {
    storage: Arc<dyn DocumentStore>,
}

impl CatalogReader {
    /// Creates a new catalog reader over the given store.
    #[must_use]
    pub fn new(storage: Arc<dyn DocumentStore>) -> Self {
        Self { storage }
    }

    /// Lists courses, optionally filtered by domain, sorted by the given key.
    ///
    /// Every course in the store is re-aggregated from its chapters and the
    /// fresh aggregate written back before filtering and sorting. This
    /// full-rewrite-on-every-read trades throughput for simplicity; it is a
    /// scalability concern, not a correctness one.
    ///
    /// The sort is stable. Ties keep the scan order, which is made
    /// deterministic by ordering the scan by document key (course IDs sort
    /// by creation time).
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be scanned or a document cannot
    /// be read, parsed, or written back.
    pub async fn list_courses(
        &self,
        sort: SortKey,
        domain: Option<&str>,
    ) -> Result<Vec<CourseSummary>> {
        let mut metas = self.storage.list(COURSE_PREFIX).await?;
        metas.sort_by(|a, b| a.key.cmp(&b.key));

        let mut courses = Vec::with_capacity(metas.len());
        for meta in metas {
            let mut course = decode_course(&self.storage.get(&meta.key).await?)?;
            course.rating = Some(rating::aggregate(&course));
            self.storage
                .put(&meta.key, encode_course(&course)?, WritePrecondition::None)
                .await?;
            courses.push(course);
        }

        let mut courses: Vec<Course> = match domain {
            Some(label) => courses
                .into_iter()
                .filter(|course| course.domain.iter().any(|d| d == label))
                .collect(),
            None => courses,
        };

        match sort {
            SortKey::Date => courses.sort_by(|a, b| b.date.cmp(&a.date)),
            SortKey::Rating => courses.sort_by(|a, b| {
                let total = |c: &Course| c.rating.map_or(0, |r| r.total);
                total(b).cmp(&total(a))
            }),
            SortKey::Name => courses.sort_by(|a, b| a.name.cmp(&b.name)),
        }

        tracing::debug!(
            count = courses.len(),
            sort = ?sort,
            domain = domain.unwrap_or(""),
            "listed courses"
        );

        Ok(courses
            .into_iter()
            .map(|course| CourseSummary {
                name: course.name,
                date: course.date,
                description: course.description,
                domain: course.domain,
                rating: course.rating.unwrap_or(crate::model::Rating::ZERO),
            })
            .collect())
    }

    /// Fetches a single course by its opaque identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for both a malformed identifier
    /// and an absent document; callers cannot distinguish the two.
    pub async fn get_course(&self, id: &str) -> Result<Course> {
        fetch_course(self.storage.as_ref(), id).await
    }

    /// Fetches a chapter by course identifier and ordinal position.
    ///
    /// `chapter_id` is an index into the course's chapter sequence, not a
    /// stable key; non-numeric and out-of-range values both yield
    /// [`CatalogError::NotFound`] with entity `chapter`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the course or chapter does
    /// not resolve.
    pub async fn get_chapter(&self, course_id: &str, chapter_id: &str) -> Result<Chapter> {
        let course = self.get_course(course_id).await?;
        let index = chapter_index(&course, chapter_id)?;
        Ok(course.chapters[index].clone())
    }
}

/// Reads and decodes one course document, collapsing identifier parse
/// failures and absent documents into the same not-found outcome.
pub(crate) async fn fetch_course(storage: &dyn DocumentStore, id: &str) -> Result<Course> {
    let course_id =
        CourseId::from_str(id).map_err(|_| CatalogError::course_not_found(id))?;

    let bytes = storage
        .get(&course_key(&course_id))
        .await
        .map_err(|e| match e {
            coursebook_core::Error::NotFound(_) => CatalogError::course_not_found(id),
            other => other.into(),
        })?;

    decode_course(&bytes)
}

/// Resolves an ordinal chapter identifier against a course.
pub(crate) fn chapter_index(course: &Course, chapter_id: &str) -> Result<usize> {
    let index: usize = chapter_id
        .parse()
        .map_err(|_| CatalogError::chapter_not_found(chapter_id))?;
    if index >= course.chapters.len() {
        return Err(CatalogError::chapter_not_found(chapter_id));
    }
    Ok(index)
}

pub(crate) fn decode_course(bytes: &[u8]) -> Result<Course> {
    serde_json::from_slice(bytes).map_err(|e| CatalogError::Serialization {
        message: format!("malformed course document: {e}"),
    })
}

pub(crate) fn encode_course(course: &Course) -> Result<Bytes> {
    serde_json::to_vec(course)
        .map(Bytes::from)
        .map_err(|e| CatalogError::Serialization {
            message: format!("failed to encode course document: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rating;
    use coursebook_core::storage::MemoryStore;

    fn course(name: &str, date: &str, domain: &[&str], chapters: Vec<Chapter>) -> Course {
        Course {
            id: CourseId::generate(),
            name: name.to_string(),
            date: date.to_string(),
            description: format!("{name} description"),
            domain: domain.iter().map(ToString::to_string).collect(),
            chapters,
            rating: None,
        }
    }

    fn chapter(rating: Option<Rating>) -> Chapter {
        Chapter {
            name: "Intro".to_string(),
            text: "Welcome".to_string(),
            rating,
        }
    }

    async fn store_with(courses: &[Course]) -> Arc<dyn DocumentStore> {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        for course in courses {
            store
                .put(
                    &course_key(&course.id),
                    encode_course(course).unwrap(),
                    WritePrecondition::None,
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn listing_aggregates_and_persists_ratings() {
        let c = course(
            "Calculus",
            "2024-09-01",
            &["mathematics"],
            vec![chapter(Some(Rating { total: 2, count: 3 })), chapter(None)],
        );
        let store = store_with(&[c.clone()]).await;
        let reader = CatalogReader::new(Arc::clone(&store));

        let listed = reader.list_courses(SortKey::Date, None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].rating, Rating { total: 2, count: 3 });

        // The recomputed aggregate is written back onto the document.
        let persisted = decode_course(&store.get(&course_key(&c.id)).await.unwrap()).unwrap();
        assert_eq!(persisted.rating, Some(Rating { total: 2, count: 3 }));
    }

    #[tokio::test]
    async fn listing_projection_has_no_id_or_chapters() {
        let c = course("Calculus", "2024-09-01", &["mathematics"], vec![chapter(None)]);
        let store = store_with(&[c]).await;
        let reader = CatalogReader::new(store);

        let listed = reader.list_courses(SortKey::Date, None).await.unwrap();
        let json = serde_json::to_value(&listed[0]).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("chapters").is_none());
        assert!(json.get("Rating").is_some());
    }

    #[tokio::test]
    async fn sort_by_name_is_ascending() {
        let store = store_with(&[
            course("Statistics", "2024-01-01", &["mathematics"], vec![]),
            course("Algebra", "2024-02-01", &["mathematics"], vec![]),
            course("Mechanics", "2024-03-01", &["physics"], vec![]),
        ])
        .await;
        let reader = CatalogReader::new(store);

        let listed = reader.list_courses(SortKey::Name, None).await.unwrap();
        let names: Vec<_> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Algebra", "Mechanics", "Statistics"]);
    }

    #[tokio::test]
    async fn sort_by_date_is_descending() {
        let store = store_with(&[
            course("Algebra", "2024-02-01", &[], vec![]),
            course("Statistics", "2024-01-01", &[], vec![]),
            course("Mechanics", "2024-03-01", &[], vec![]),
        ])
        .await;
        let reader = CatalogReader::new(store);

        let listed = reader.list_courses(SortKey::Date, None).await.unwrap();
        let dates: Vec<_> = listed.iter().map(|c| c.date.as_str()).collect();
        assert_eq!(dates, ["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[tokio::test]
    async fn sort_by_rating_is_descending_by_total() {
        let store = store_with(&[
            course("Low", "2024-01-01", &[], vec![chapter(Some(Rating { total: 1, count: 2 }))]),
            course("High", "2024-01-02", &[], vec![chapter(Some(Rating { total: 5, count: 6 }))]),
            course("Mid", "2024-01-03", &[], vec![chapter(Some(Rating { total: 3, count: 4 }))]),
        ])
        .await;
        let reader = CatalogReader::new(store);

        let listed = reader.list_courses(SortKey::Rating, None).await.unwrap();
        let totals: Vec<_> = listed.iter().map(|c| c.rating.total).collect();
        assert_eq!(totals, [5, 3, 1]);
    }

    #[tokio::test]
    async fn domain_filter_matches_any_position() {
        let store = store_with(&[
            course("Algebra", "2024-01-01", &["mathematics"], vec![]),
            course("Biostatistics", "2024-01-02", &["biology", "mathematics"], vec![]),
            course("Mechanics", "2024-01-03", &["physics"], vec![]),
        ])
        .await;
        let reader = CatalogReader::new(store);

        let listed = reader
            .list_courses(SortKey::Name, Some("mathematics"))
            .await
            .unwrap();
        let names: Vec<_> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Algebra", "Biostatistics"]);
    }

    #[tokio::test]
    async fn listing_twice_without_votes_is_idempotent() {
        let store = store_with(&[course(
            "Calculus",
            "2024-09-01",
            &["mathematics"],
            vec![chapter(Some(Rating { total: 2, count: 3 }))],
        )])
        .await;
        let reader = CatalogReader::new(store);

        let first = reader.list_courses(SortKey::Date, None).await.unwrap();
        let second = reader.list_courses(SortKey::Date, None).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn get_course_with_malformed_id_is_not_found() {
        let store = store_with(&[]).await;
        let reader = CatalogReader::new(store);

        let err = reader.get_course("not-a-ulid").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "course", .. }));
    }

    #[tokio::test]
    async fn get_course_absent_document_is_not_found() {
        let store = store_with(&[]).await;
        let reader = CatalogReader::new(store);

        let id = CourseId::generate().to_string();
        let err = reader.get_course(&id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "course", .. }));
    }

    #[tokio::test]
    async fn get_chapter_resolves_ordinal() {
        let c = course(
            "Calculus",
            "2024-09-01",
            &["mathematics"],
            vec![
                chapter(Some(Rating { total: 1, count: 1 })),
                Chapter {
                    name: "Big Picture of Calculus".to_string(),
                    text: "Highlights of Calculus".to_string(),
                    rating: Some(Rating::ZERO),
                },
            ],
        );
        let id = c.id.to_string();
        let store = store_with(&[c]).await;
        let reader = CatalogReader::new(store);

        let ch = reader.get_chapter(&id, "1").await.unwrap();
        assert_eq!(ch.name, "Big Picture of Calculus");
        assert_eq!(ch.text, "Highlights of Calculus");
    }

    #[tokio::test]
    async fn out_of_range_chapter_is_not_found() {
        let c = course("Calculus", "2024-09-01", &[], vec![chapter(None); 3]);
        let id = c.id.to_string();
        let store = store_with(&[c]).await;
        let reader = CatalogReader::new(store);

        let err = reader.get_chapter(&id, "990").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "chapter", .. }));
    }

    #[tokio::test]
    async fn non_numeric_chapter_is_not_found() {
        let c = course("Calculus", "2024-09-01", &[], vec![chapter(None)]);
        let id = c.id.to_string();
        let store = store_with(&[c]).await;
        let reader = CatalogReader::new(store);

        let err = reader.get_chapter(&id, "first").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "chapter", .. }));
    }
}
