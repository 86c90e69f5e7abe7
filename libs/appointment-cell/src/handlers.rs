// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use shared_models::{auth::User, error::AppError};

use crate::models::{
    BookingError, SelectDateRequest, SelectTimeRequest, StartBookingRequest, UpdateDetailsRequest,
};
use crate::services::{BookingService, DashboardService};
use crate::state::AppointmentState;

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        let message = e.to_string();
        match e {
            BookingError::DoctorNotFound
            | BookingError::FlowNotFound
            | BookingError::AppointmentNotFound => AppError::NotFound(message),
            BookingError::DateOutsideWindow(_)
            | BookingError::InvalidDateIndex(_)
            | BookingError::InvalidTimeSlot(_)
            | BookingError::UnsupportedDocument(_) => AppError::ValidationError(message),
            BookingError::DateRequired
            | BookingError::DateNotSelected
            | BookingError::MissingSelection(_) => AppError::BadRequest(message),
            BookingError::AlreadySubmitting
            | BookingError::AlreadyConfirmed
            | BookingError::NotSubmitting
            | BookingError::SubmissionCancelled => AppError::Conflict(message),
            BookingError::SubmissionFailed(_) => AppError::Internal(message),
        }
    }
}

// ==============================================================================
// DASHBOARD AND APPOINTMENT LISTINGS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let dashboard_service = DashboardService::new(state.fixtures.clone());

    Ok(Json(json!(dashboard_service.overview(&user))))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppointmentState>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let dashboard_service = DashboardService::new(state.fixtures.clone());
    let appointments = dashboard_service.list_appointments();

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let dashboard_service = DashboardService::new(state.fixtures.clone());

    let appointment = dashboard_service.get_appointment(&appointment_id)?;

    Ok(Json(json!(appointment)))
}

// ==============================================================================
// BOOKING FLOW HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn start_booking(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Json(request): Json<StartBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let flow = booking_service.start(&user.id, &request.doctor_id).await?;

    Ok(Json(json!(flow)))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Path(flow_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let flow = booking_service.get(flow_id, &user.id).await?;

    Ok(Json(json!(flow)))
}

#[axum::debug_handler]
pub async fn select_date(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Path(flow_id): Path<Uuid>,
    Json(request): Json<SelectDateRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let flow = booking_service.select_date(flow_id, &user.id, request).await?;

    Ok(Json(json!(flow)))
}

#[axum::debug_handler]
pub async fn select_time(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Path(flow_id): Path<Uuid>,
    Json(request): Json<SelectTimeRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let flow = booking_service.select_time(flow_id, &user.id, &request.time).await?;

    Ok(Json(json!(flow)))
}

#[axum::debug_handler]
pub async fn update_details(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Path(flow_id): Path<Uuid>,
    Json(request): Json<UpdateDetailsRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let flow = booking_service.update_details(flow_id, &user.id, request).await?;

    Ok(Json(json!(flow)))
}

#[axum::debug_handler]
pub async fn submit_booking(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Path(flow_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    info!("Booking submission for flow {} from user {}", flow_id, user.id);
    let booking_service = BookingService::new(&state);

    let flow = booking_service.submit(flow_id, &user.id).await?;

    Ok(Json(json!(flow)))
}

#[axum::debug_handler]
pub async fn cancel_submission(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Path(flow_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let flow = booking_service.cancel(flow_id, &user.id).await?;

    Ok(Json(json!(flow)))
}

#[axum::debug_handler]
pub async fn exit_booking(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Path(flow_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let redirect = booking_service.exit(flow_id, &user.id).await?;

    Ok(Json(json!({ "redirect": redirect })))
}
