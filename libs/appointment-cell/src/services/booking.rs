// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use shared_database::FixtureStore;

use crate::models::{
    BookingError, BookingFlowView, SelectDateRequest, UpdateDetailsRequest, DASHBOARD_REDIRECT,
};
use crate::services::flow::BookingFlow;
use crate::services::store::BookingFlowStore;
use crate::services::submission::BookingSubmitter;
use crate::state::AppointmentState;

pub struct BookingService {
    fixtures: Arc<FixtureStore>,
    flows: Arc<BookingFlowStore>,
    submitter: Arc<dyn BookingSubmitter>,
    window_days: u32,
}

impl BookingService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            fixtures: Arc::clone(&state.fixtures),
            flows: Arc::clone(&state.flows),
            submitter: Arc::clone(&state.submitter),
            window_days: state.config.booking_window_days,
        }
    }

    pub async fn start(&self, patient_id: &str, doctor_id: &str) -> Result<BookingFlowView, BookingError> {
        self.start_on(patient_id, doctor_id, Utc::now().date_naive()).await
    }

    /// Opens a flow whose date window is counted from `today`.
    pub async fn start_on(
        &self,
        patient_id: &str,
        doctor_id: &str,
        today: NaiveDate,
    ) -> Result<BookingFlowView, BookingError> {
        let doctor = self
            .fixtures
            .find_doctor(doctor_id)
            .cloned()
            .ok_or(BookingError::DoctorNotFound)?;

        let flow = BookingFlow::start(patient_id, doctor, today, self.window_days);
        let view = flow.view();
        self.flows.insert(flow).await;

        info!("Patient {} started booking flow {} with doctor {}", patient_id, view.flow_id, doctor_id);
        Ok(view)
    }

    pub async fn get(&self, flow_id: Uuid, patient_id: &str) -> Result<BookingFlowView, BookingError> {
        Ok(self.flows.get(flow_id, patient_id).await?.view())
    }

    pub async fn select_date(
        &self,
        flow_id: Uuid,
        patient_id: &str,
        request: SelectDateRequest,
    ) -> Result<BookingFlowView, BookingError> {
        self.flows
            .update(flow_id, patient_id, |flow| {
                match (request.date, request.date_index) {
                    (Some(date), _) => flow.select_date(date)?,
                    (None, Some(index)) => flow.select_date_index(index)?,
                    (None, None) => return Err(BookingError::DateRequired),
                }
                Ok(flow.view())
            })
            .await
    }

    pub async fn select_time(
        &self,
        flow_id: Uuid,
        patient_id: &str,
        time: &str,
    ) -> Result<BookingFlowView, BookingError> {
        self.flows
            .update(flow_id, patient_id, |flow| {
                flow.select_time(time)?;
                Ok(flow.view())
            })
            .await
    }

    pub async fn update_details(
        &self,
        flow_id: Uuid,
        patient_id: &str,
        request: UpdateDetailsRequest,
    ) -> Result<BookingFlowView, BookingError> {
        self.flows
            .update(flow_id, patient_id, |flow| {
                // Attachments first: they are the only part that can be rejected.
                if let Some(documents) = request.documents {
                    flow.attach_documents(documents)?;
                }
                if let Some(notes) = request.notes {
                    flow.set_notes(Some(notes))?;
                }
                Ok(flow.view())
            })
            .await
    }

    /// Submits the booking and waits for the outcome. The store lock is
    /// released while the submission is in flight.
    pub async fn submit(&self, flow_id: Uuid, patient_id: &str) -> Result<BookingFlowView, BookingError> {
        let ticket = self
            .flows
            .update(flow_id, patient_id, |flow| flow.begin_submission())
            .await?;

        let outcome = self.submitter.submit(ticket.request, ticket.cancel).await;
        let failure = outcome.as_ref().err().cloned();

        let view = self
            .flows
            .update(flow_id, patient_id, |flow| {
                flow.complete_submission(outcome)?;
                Ok(flow.view())
            })
            .await?;

        match failure {
            Some(e) => Err(e),
            None => Ok(view),
        }
    }

    pub async fn cancel(&self, flow_id: Uuid, patient_id: &str) -> Result<BookingFlowView, BookingError> {
        self.flows
            .update(flow_id, patient_id, |flow| {
                flow.cancel_submission()?;
                Ok(flow.view())
            })
            .await
    }

    /// Leaves the flow, dropping its state, and says where to go next.
    pub async fn exit(&self, flow_id: Uuid, patient_id: &str) -> Result<&'static str, BookingError> {
        let flow = self.flows.remove(flow_id, patient_id).await?;
        if flow.cancel_submission().is_ok() {
            debug!("Flow {} left mid-submission", flow_id);
        }
        Ok(DASHBOARD_REDIRECT)
    }
}
