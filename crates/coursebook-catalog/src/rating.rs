//! Vote validation and rating aggregation.
//!
//! Votes are constrained to the open interval (−2, 2): the integers −1, 0,
//! and 1. Aggregation sums chapter ratings into a course-level rating,
//! treating a missing chapter rating as zero.

use crate::error::{CatalogError, Result};
use crate::model::{Chapter, Course, Rating};

/// Exclusive lower bound for a vote.
pub const VOTE_MIN_EXCLUSIVE: i64 = -2;
/// Exclusive upper bound for a vote.
pub const VOTE_MAX_EXCLUSIVE: i64 = 2;

/// Validates a vote value before any store access.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] when the vote is outside the open
/// interval (−2, 2).
pub fn validate_vote(vote: i64) -> Result<()> {
    if vote <= VOTE_MIN_EXCLUSIVE || vote >= VOTE_MAX_EXCLUSIVE {
        return Err(CatalogError::validation(format!(
            "Rating must be greater than {VOTE_MIN_EXCLUSIVE} and less than {VOTE_MAX_EXCLUSIVE}, got {vote}"
        )));
    }
    Ok(())
}

/// Applies a vote to a chapter, accumulating in place.
///
/// A chapter with no rating yet is initialized to `{Total: vote, Count: 1}`;
/// otherwise the vote is added to the running total and the count
/// incremented. Never a replace.
pub fn apply_vote(chapter: &mut Chapter, vote: i64) {
    match chapter.rating.as_mut() {
        Some(rating) => {
            rating.total += vote;
            rating.count += 1;
        }
        None => {
            chapter.rating = Some(Rating {
                total: vote,
                count: 1,
            });
        }
    }
}

/// Computes a course's aggregate rating from its chapters.
///
/// Sums chapter totals and counts; a chapter without a rating contributes
/// `{0, 0}` silently. A course with no chapters aggregates to `{0, 0}`.
#[must_use]
pub fn aggregate(course: &Course) -> Rating {
    course
        .chapters
        .iter()
        .filter_map(|chapter| chapter.rating)
        .fold(Rating::ZERO, |acc, rating| Rating {
            total: acc.total + rating.total,
            count: acc.count + rating.count,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebook_core::CourseId;

    fn course_with_chapters(chapters: Vec<Chapter>) -> Course {
        Course {
            id: CourseId::generate(),
            name: "Calculus".to_string(),
            date: "2024-09-01".to_string(),
            description: "Limits and derivatives".to_string(),
            domain: vec!["mathematics".to_string()],
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

    #[test]
    fn votes_in_open_interval_are_accepted() {
        for vote in [-1, 0, 1] {
            assert!(validate_vote(vote).is_ok(), "vote {vote} should pass");
        }
    }

    #[test]
    fn boundary_votes_are_rejected() {
        for vote in [-2, 2, -10, 10] {
            let err = validate_vote(vote).unwrap_err();
            assert!(matches!(err, CatalogError::Validation { .. }));
        }
    }

    #[test]
    fn first_vote_initializes_rating() {
        let mut ch = chapter(None);
        apply_vote(&mut ch, 1);
        assert_eq!(ch.rating, Some(Rating { total: 1, count: 1 }));
    }

    #[test]
    fn vote_accumulates_into_existing_rating() {
        let mut ch = chapter(Some(Rating { total: 2, count: 3 }));
        apply_vote(&mut ch, -1);
        assert_eq!(ch.rating, Some(Rating { total: 1, count: 4 }));
    }

    #[test]
    fn zero_vote_still_counts() {
        let mut ch = chapter(Some(Rating { total: 2, count: 3 }));
        apply_vote(&mut ch, 0);
        assert_eq!(ch.rating, Some(Rating { total: 2, count: 4 }));
    }

    #[test]
    fn aggregate_sums_chapter_ratings() {
        let course = course_with_chapters(vec![
            chapter(Some(Rating { total: 2, count: 3 })),
            chapter(Some(Rating { total: -1, count: 2 })),
        ]);
        assert_eq!(aggregate(&course), Rating { total: 1, count: 5 });
    }

    #[test]
    fn missing_chapter_rating_counts_as_zero() {
        let course = course_with_chapters(vec![
            chapter(Some(Rating { total: 2, count: 3 })),
            chapter(None),
        ]);
        assert_eq!(aggregate(&course), Rating { total: 2, count: 3 });
    }

    #[test]
    fn chapterless_course_aggregates_to_zero() {
        let course = course_with_chapters(Vec::new());
        assert_eq!(aggregate(&course), Rating::ZERO);
    }
}
