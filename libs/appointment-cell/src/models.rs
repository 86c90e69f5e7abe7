// libs/appointment-cell/src/models.rs
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use shared_models::{Appointment, AppointmentStatus, DoctorProfile};

/// File extensions accepted as booking attachments.
pub const ACCEPTED_DOCUMENT_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

pub const DASHBOARD_REDIRECT: &str = "/dashboard";

// ==============================================================================
// BOOKING FLOW STAGES
// ==============================================================================

/// Where a booking flow currently stands. Stages that can be submitted carry
/// both a date and a time, so a submission without them cannot be expressed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum BookingStage {
    SelectingDate,
    SelectingTime {
        date: NaiveDate,
    },
    Reviewing {
        date: NaiveDate,
        time: String,
    },
    Submitting {
        date: NaiveDate,
        time: String,
        #[serde(skip)]
        cancel: CancellationToken,
    },
    Confirmed {
        confirmation: BookingConfirmation,
    },
    Failed {
        date: NaiveDate,
        time: String,
        reason: String,
    },
}

impl BookingStage {
    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self {
            BookingStage::SelectingDate => None,
            BookingStage::SelectingTime { date }
            | BookingStage::Reviewing { date, .. }
            | BookingStage::Submitting { date, .. }
            | BookingStage::Failed { date, .. } => Some(*date),
            BookingStage::Confirmed { confirmation } => Some(confirmation.date),
        }
    }

    pub fn selected_time(&self) -> Option<&str> {
        match self {
            BookingStage::SelectingDate | BookingStage::SelectingTime { .. } => None,
            BookingStage::Reviewing { time, .. }
            | BookingStage::Submitting { time, .. }
            | BookingStage::Failed { time, .. } => Some(time),
            BookingStage::Confirmed { confirmation } => Some(&confirmation.time),
        }
    }

    /// Selections, notes and attachments may change only in these stages.
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            BookingStage::SelectingDate
                | BookingStage::SelectingTime { .. }
                | BookingStage::Reviewing { .. }
                | BookingStage::Failed { .. }
        )
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, BookingStage::Reviewing { .. } | BookingStage::Failed { .. })
    }
}

// ==============================================================================
// SUBMISSION
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub flow_id: Uuid,
    pub patient_id: String,
    pub doctor_id: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub notes: Option<String>,
    pub documents: Vec<String>,
}

impl BookingRequest {
    pub fn into_pending_appointment(self) -> Appointment {
        Appointment {
            id: Uuid::new_v4().to_string(),
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            status: AppointmentStatus::Pending,
            notes: self.notes,
            documents: self.documents,
            created_at: Utc::now(),
            doctor: None,
        }
    }
}

/// Hands the submission task what it needs; the flow keeps a clone of the token.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub request: BookingRequest,
    pub cancel: CancellationToken,
}

/// Summary shown once a booking has gone through.
#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub appointment: Appointment,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub formatted_date: String,
    pub time: String,
    pub fee: String,
}

impl BookingConfirmation {
    pub fn new(doctor: &DoctorProfile, mut appointment: Appointment) -> Self {
        if appointment.doctor.is_none() {
            appointment.doctor = Some(doctor.clone());
        }

        Self {
            doctor_name: doctor.full_name().to_string(),
            date: appointment.appointment_date,
            formatted_date: format_display_date(appointment.appointment_date),
            time: appointment.appointment_time.clone(),
            fee: doctor.formatted_fee(),
            appointment,
        }
    }
}

/// "Oct 20, 2026"
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

// ==============================================================================
// REQUEST / RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartBookingRequest {
    pub doctor_id: String,
}

/// Either an explicit date or an index into the offered dates (0 = tomorrow).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectDateRequest {
    pub date: Option<NaiveDate>,
    pub date_index: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectTimeRequest {
    pub time: String,
}

/// Fields left out are kept as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDetailsRequest {
    pub notes: Option<String>,
    pub documents: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorSummary {
    pub id: String,
    pub full_name: String,
    pub specialty: String,
    pub location: String,
    pub rating: f32,
    pub consultation_fee: f64,
    pub fee: String,
}

impl From<&DoctorProfile> for DoctorSummary {
    fn from(doctor: &DoctorProfile) -> Self {
        Self {
            id: doctor.id.clone(),
            full_name: doctor.full_name().to_string(),
            specialty: doctor.specialty.clone(),
            location: doctor.location.clone(),
            rating: doctor.rating,
            consultation_fee: doctor.consultation_fee,
            fee: doctor.formatted_fee(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingFlowView {
    pub flow_id: Uuid,
    pub doctor: DoctorSummary,
    pub stage: BookingStage,
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<String>,
    pub notes: Option<String>,
    pub documents: Vec<String>,
    pub available_dates: Vec<NaiveDate>,
    pub available_times: Vec<String>,
    pub can_submit: bool,
}

// ==============================================================================
// DASHBOARD MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppointmentStats {
    pub total_appointments: usize,
    pub upcoming_appointments: usize,
    pub completed_appointments: usize,
    pub cancelled_appointments: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub greeting: String,
    pub upcoming: Vec<Appointment>,
    pub recent: Vec<Appointment>,
    pub stats: AppointmentStats,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Booking flow not found")]
    FlowNotFound,

    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Date {0} is outside the booking window")]
    DateOutsideWindow(NaiveDate),

    #[error("No bookable date at index {0}")]
    InvalidDateIndex(usize),

    #[error("Either a date or a date index is required")]
    DateRequired,

    #[error("Time {0} is not offered by this doctor")]
    InvalidTimeSlot(String),

    #[error("A date must be selected before choosing a time")]
    DateNotSelected,

    #[error("Cannot submit booking: {0} not selected")]
    MissingSelection(&'static str),

    #[error("Unsupported document {0}: only pdf, jpg, jpeg and png files are accepted")]
    UnsupportedDocument(String),

    #[error("Booking is already being submitted")]
    AlreadySubmitting,

    #[error("Booking is already confirmed")]
    AlreadyConfirmed,

    #[error("No submission in progress")]
    NotSubmitting,

    #[error("Booking submission was cancelled")]
    SubmissionCancelled,

    #[error("Booking submission failed: {0}")]
    SubmissionFailed(String),
}
