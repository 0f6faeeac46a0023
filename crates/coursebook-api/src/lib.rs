//! # coursebook-api
//!
//! HTTP composition layer for the Coursebook catalog service.
//!
//! This crate is a **thin composition layer** with no domain policy: all
//! rating, aggregation, and query logic lives in `coursebook-catalog`.
//!
//! ## Endpoints
//!
//! ```text
//! GET  /health                                  - Health check
//! GET  /ready                                   - Readiness check
//! GET  /openapi.json                            - OpenAPI document
//! GET  /all_courses                             - Course listing (sort/filter)
//! GET  /all_courses/{course_id}                 - Course detail
//! GET  /all_courses/{course_id}/{chapter_id}    - Chapter detail
//! POST /all_courses/{course_id}/{chapter_id}    - Rate a chapter
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod server;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::server::Server;
}
