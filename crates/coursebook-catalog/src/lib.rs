//! # coursebook-catalog
//!
//! Domain logic for the Coursebook catalog service.
//!
//! This crate owns the course/chapter/rating model and the operations over
//! it:
//!
//! - **Rating aggregation**: chapter votes rolled up to course level
//! - **Listing queries**: domain filtering and deterministic sorting
//! - **Vote writes**: validated, accumulate-in-place chapter rating updates
//! - **Seeding**: bulk import of course records into the store
//!
//! All operations go through the [`coursebook_core::storage::DocumentStore`]
//! contract; this crate holds no state of its own.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod error;
pub mod model;
pub mod paths;
pub mod rating;
pub mod reader;
pub mod seed;
pub mod writer;

pub use error::{CatalogError, Result};
pub use model::{Chapter, Course, CourseSummary, Rating, SortKey};
pub use reader::CatalogReader;
pub use writer::CatalogWriter;
