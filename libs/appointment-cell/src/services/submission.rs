// libs/appointment-cell/src/services/submission.rs
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_models::Appointment;

use crate::models::{BookingError, BookingRequest};

/// Carries a booking request to whatever records appointments.
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(
        &self,
        request: BookingRequest,
        cancel: CancellationToken,
    ) -> Result<Appointment, BookingError>;
}

/// Stands in for a booking backend: waits a fixed delay, then always accepts.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.booking_submit_delay())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl BookingSubmitter for SimulatedSubmitter {
    async fn submit(
        &self,
        request: BookingRequest,
        cancel: CancellationToken,
    ) -> Result<Appointment, BookingError> {
        debug!("Simulating booking submission for flow {} ({:?})", request.flow_id, self.delay);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Booking submission for flow {} cancelled", request.flow_id);
                Err(BookingError::SubmissionCancelled)
            }
            _ = tokio::time::sleep(self.delay) => {
                let appointment = request.into_pending_appointment();
                info!("Booking accepted as appointment {}", appointment.id);
                Ok(appointment)
            }
        }
    }
}
