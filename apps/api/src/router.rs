use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::{router::appointment_routes, AppointmentState};
use auth_cell::router::auth_routes;
use doctor_cell::router::doctor_routes;
use shared_config::AppConfig;
use shared_database::FixtureStore;

pub fn create_router(config: Arc<AppConfig>, fixtures: Arc<FixtureStore>) -> Router {
    let appointment_state = AppointmentState::new(config.clone(), fixtures.clone());

    Router::new()
        .route("/", get(|| async { "DocSpot API is running!" }))
        .nest("/auth", auth_routes(config))
        .nest("/doctors", doctor_routes(fixtures))
        .nest("/appointments", appointment_routes(appointment_state))
}
