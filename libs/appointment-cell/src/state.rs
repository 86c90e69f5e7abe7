use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::FixtureStore;

use crate::services::{BookingFlowStore, BookingSubmitter, SimulatedSubmitter};

/// Shared state behind the appointment routes.
#[derive(Clone)]
pub struct AppointmentState {
    pub config: Arc<AppConfig>,
    pub fixtures: Arc<FixtureStore>,
    pub flows: Arc<BookingFlowStore>,
    pub submitter: Arc<dyn BookingSubmitter>,
}

impl AppointmentState {
    pub fn new(config: Arc<AppConfig>, fixtures: Arc<FixtureStore>) -> Self {
        let submitter = Arc::new(SimulatedSubmitter::from_config(&config));
        Self {
            config,
            fixtures,
            flows: Arc::new(BookingFlowStore::new()),
            submitter,
        }
    }

    pub fn with_submitter(mut self, submitter: Arc<dyn BookingSubmitter>) -> Self {
        self.submitter = submitter;
        self
    }
}
