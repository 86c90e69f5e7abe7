use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::FixtureStore;

use crate::handlers;

pub fn doctor_routes(fixtures: Arc<FixtureStore>) -> Router {
    // Browsing the roster needs no session.
    Router::new()
        .route("/search", get(handlers::search_doctors))
        .route("/filters", get(handlers::get_filter_options))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(fixtures)
}
