// libs/appointment-cell/src/services/dashboard.rs
use std::sync::Arc;

use tracing::debug;

use shared_database::FixtureStore;
use shared_models::{auth::User, Appointment, AppointmentStatus};

use crate::models::{AppointmentStats, BookingError, DashboardOverview};

const RECENT_LIMIT: usize = 3;

pub struct DashboardService {
    fixtures: Arc<FixtureStore>,
}

impl DashboardService {
    pub fn new(fixtures: Arc<FixtureStore>) -> Self {
        Self { fixtures }
    }

    pub fn overview(&self, user: &User) -> DashboardOverview {
        debug!("Building dashboard for user {}", user.id);
        let appointments = self.fixtures.appointments();

        DashboardOverview {
            greeting: user.greeting(),
            upcoming: self.upcoming(),
            recent: appointments.iter().take(RECENT_LIMIT).cloned().collect(),
            stats: self.stats(),
        }
    }

    /// Everything not yet completed, cancelled ones included.
    pub fn upcoming(&self) -> Vec<Appointment> {
        self.fixtures
            .appointments()
            .iter()
            .filter(|a| a.status != AppointmentStatus::Completed)
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> AppointmentStats {
        let appointments = self.fixtures.appointments();
        let count = |status: AppointmentStatus| appointments.iter().filter(|a| a.status == status).count();

        AppointmentStats {
            total_appointments: appointments.len(),
            upcoming_appointments: appointments.len() - count(AppointmentStatus::Completed),
            completed_appointments: count(AppointmentStatus::Completed),
            cancelled_appointments: count(AppointmentStatus::Cancelled),
        }
    }

    pub fn list_appointments(&self) -> Vec<Appointment> {
        self.fixtures.appointments().to_vec()
    }

    pub fn get_appointment(&self, appointment_id: &str) -> Result<Appointment, BookingError> {
        self.fixtures
            .find_appointment(appointment_id)
            .cloned()
            .ok_or(BookingError::AppointmentNotFound)
    }
}
