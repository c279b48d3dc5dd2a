use axum::{routing::get, Router};

use crate::features::reports::handlers;

/// Create routes for the report directory feature (public)
pub fn routes() -> Router {
    Router::new().route("/api/reports", get(handlers::list_report_types))
}
