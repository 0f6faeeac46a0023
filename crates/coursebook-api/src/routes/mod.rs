//! HTTP route handlers.

pub mod courses;

use std::sync::Arc;

use axum::Router;

use crate::server::AppState;

/// Course catalog routes.
pub fn catalog_routes() -> Router<Arc<AppState>> {
    courses::routes()
}
