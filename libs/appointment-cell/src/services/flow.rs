// libs/appointment-cell/src/services/flow.rs
use std::path::Path;

use chrono::{Days, NaiveDate};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::{Appointment, DoctorProfile};

use crate::models::{
    BookingConfirmation, BookingError, BookingFlowView, BookingRequest, BookingStage,
    DoctorSummary, SubmissionTicket, ACCEPTED_DOCUMENT_EXTENSIONS,
};

/// One patient's walk through booking a single doctor.
///
/// Every operation validates before it mutates, so a rejected call leaves the
/// flow exactly as it was.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    id: Uuid,
    patient_id: String,
    doctor: DoctorProfile,
    today: NaiveDate,
    window_days: u32,
    notes: Option<String>,
    documents: Vec<String>,
    stage: BookingStage,
}

impl BookingFlow {
    pub fn start(patient_id: &str, doctor: DoctorProfile, today: NaiveDate, window_days: u32) -> Self {
        let flow = Self {
            id: Uuid::new_v4(),
            patient_id: patient_id.to_string(),
            doctor,
            today,
            window_days,
            notes: None,
            documents: Vec::new(),
            stage: BookingStage::SelectingDate,
        };
        debug!("Started booking flow {} for doctor {}", flow.id, flow.doctor.id);
        flow
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn doctor(&self) -> &DoctorProfile {
        &self.doctor
    }

    pub fn stage(&self) -> &BookingStage {
        &self.stage
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// The next `window_days` calendar days; today is never offered.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        (1..=u64::from(self.window_days))
            .filter_map(|offset| self.today.checked_add_days(Days::new(offset)))
            .collect()
    }

    pub fn available_times(&self) -> &[String] {
        &self.doctor.availability
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        self.ensure_editable()?;
        if !self.available_dates().contains(&date) {
            return Err(BookingError::DateOutsideWindow(date));
        }

        // A time picked earlier survives a new date.
        self.stage = match &self.stage {
            BookingStage::Reviewing { time, .. } | BookingStage::Failed { time, .. } => {
                BookingStage::Reviewing { date, time: time.clone() }
            }
            _ => BookingStage::SelectingTime { date },
        };
        debug!("Flow {} selected date {}", self.id, date);
        Ok(())
    }

    pub fn select_date_index(&mut self, index: usize) -> Result<(), BookingError> {
        let date = self
            .available_dates()
            .get(index)
            .copied()
            .ok_or(BookingError::InvalidDateIndex(index))?;
        self.select_date(date)
    }

    pub fn select_time(&mut self, time: &str) -> Result<(), BookingError> {
        self.ensure_editable()?;
        if !self.doctor.offers_time(time) {
            return Err(BookingError::InvalidTimeSlot(time.to_string()));
        }
        let date = self.stage.selected_date().ok_or(BookingError::DateNotSelected)?;

        self.stage = BookingStage::Reviewing { date, time: time.to_string() };
        debug!("Flow {} selected time {}", self.id, time);
        Ok(())
    }

    pub fn set_notes(&mut self, notes: Option<String>) -> Result<(), BookingError> {
        self.ensure_editable()?;
        self.notes = notes.filter(|n| !n.trim().is_empty());
        Ok(())
    }

    /// Replaces the attachment list. Files are recorded by name only.
    pub fn attach_documents(&mut self, documents: Vec<String>) -> Result<(), BookingError> {
        self.ensure_editable()?;
        if let Some(rejected) = documents.iter().find(|name| !is_accepted_document(name)) {
            return Err(BookingError::UnsupportedDocument(rejected.clone()));
        }
        self.documents = documents;
        Ok(())
    }

    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, BookingError> {
        let (date, time) = match &self.stage {
            BookingStage::Reviewing { date, time } | BookingStage::Failed { date, time, .. } => {
                (*date, time.clone())
            }
            BookingStage::SelectingDate => return Err(BookingError::MissingSelection("date and time")),
            BookingStage::SelectingTime { .. } => return Err(BookingError::MissingSelection("time")),
            BookingStage::Submitting { .. } => return Err(BookingError::AlreadySubmitting),
            BookingStage::Confirmed { .. } => return Err(BookingError::AlreadyConfirmed),
        };

        let cancel = CancellationToken::new();
        let request = BookingRequest {
            flow_id: self.id,
            patient_id: self.patient_id.clone(),
            doctor_id: self.doctor.id.clone(),
            appointment_date: date,
            appointment_time: time.clone(),
            notes: self.notes.clone(),
            documents: self.documents.clone(),
        };

        self.stage = BookingStage::Submitting { date, time, cancel: cancel.clone() };
        info!("Flow {} submitting booking with doctor {}", self.id, self.doctor.id);

        Ok(SubmissionTicket { request, cancel })
    }

    pub fn complete_submission(
        &mut self,
        outcome: Result<Appointment, BookingError>,
    ) -> Result<(), BookingError> {
        let (date, time) = match &self.stage {
            BookingStage::Submitting { date, time, .. } => (*date, time.clone()),
            _ => return Err(BookingError::NotSubmitting),
        };

        self.stage = match outcome {
            Ok(appointment) => {
                info!("Flow {} confirmed as appointment {}", self.id, appointment.id);
                BookingStage::Confirmed {
                    confirmation: BookingConfirmation::new(&self.doctor, appointment),
                }
            }
            Err(e) => {
                warn!("Flow {} submission failed: {}", self.id, e);
                BookingStage::Failed { date, time, reason: e.to_string() }
            }
        };
        Ok(())
    }

    pub fn cancel_submission(&self) -> Result<(), BookingError> {
        match &self.stage {
            BookingStage::Submitting { cancel, .. } => {
                cancel.cancel();
                info!("Flow {} submission cancellation requested", self.id);
                Ok(())
            }
            _ => Err(BookingError::NotSubmitting),
        }
    }

    pub fn view(&self) -> BookingFlowView {
        BookingFlowView {
            flow_id: self.id,
            doctor: DoctorSummary::from(&self.doctor),
            stage: self.stage.clone(),
            selected_date: self.stage.selected_date(),
            selected_time: self.stage.selected_time().map(String::from),
            notes: self.notes.clone(),
            documents: self.documents.clone(),
            available_dates: self.available_dates(),
            available_times: self.doctor.availability.clone(),
            can_submit: self.stage.can_submit(),
        }
    }

    fn ensure_editable(&self) -> Result<(), BookingError> {
        if self.stage.is_editable() {
            return Ok(());
        }
        match &self.stage {
            BookingStage::Confirmed { .. } => Err(BookingError::AlreadyConfirmed),
            _ => Err(BookingError::AlreadySubmitting),
        }
    }
}

pub fn is_accepted_document(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_DOCUMENT_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}
