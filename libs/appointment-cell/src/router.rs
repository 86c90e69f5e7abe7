// libs/appointment-cell/src/router.rs
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::state::AppointmentState;

pub fn appointment_routes(state: AppointmentState) -> Router {
    // Every appointment operation requires a session
    let protected_routes = Router::new()
        .route("/", get(handlers::list_appointments))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/{appointment_id}", get(handlers::get_appointment))

        // Booking flow
        .route("/bookings", post(handlers::start_booking))
        .route("/bookings/{flow_id}", get(handlers::get_booking).delete(handlers::exit_booking))
        .route("/bookings/{flow_id}/date", put(handlers::select_date))
        .route("/bookings/{flow_id}/time", put(handlers::select_time))
        .route("/bookings/{flow_id}/details", put(handlers::update_details))
        .route("/bookings/{flow_id}/submit", post(handlers::submit_booking))
        .route("/bookings/{flow_id}/cancel", post(handlers::cancel_submission))

        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
