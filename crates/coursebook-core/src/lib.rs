//! # coursebook-core
//!
//! Shared infrastructure for the Coursebook catalog service.
//!
//! This crate provides the building blocks the domain and API layers sit on:
//!
//! - **Errors**: the shared error taxonomy and result alias
//! - **Identifiers**: strongly-typed, sortable course identifiers
//! - **Storage**: the document-store contract and an in-memory backend
//! - **Observability**: structured logging initialization

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod error;
pub mod id;
pub mod observability;
pub mod storage;

pub use error::{Error, Result};
pub use id::CourseId;
