use std::sync::Arc;

use tracing::debug;

use shared_database::FixtureStore;
use shared_models::DoctorProfile;

use crate::models::{DoctorError, DoctorSearchFilters, FilterOptions};

pub struct DoctorSearchService {
    fixtures: Arc<FixtureStore>,
}

impl DoctorSearchService {
    pub fn new(fixtures: Arc<FixtureStore>) -> Self {
        Self { fixtures }
    }

    /// Doctors matching every criterion, in roster order.
    pub fn search(&self, filters: &DoctorSearchFilters) -> Result<Vec<DoctorProfile>, DoctorError> {
        filters.validate()?;
        debug!("Searching doctors with filters: {:?}", filters);

        let doctors: Vec<DoctorProfile> = self
            .fixtures
            .doctors()
            .iter()
            .filter(|doctor| matches_filters(doctor, filters))
            .cloned()
            .collect();

        debug!("Search matched {} of {} doctors", doctors.len(), self.fixtures.doctors().len());
        Ok(doctors)
    }

    pub fn filter_options(&self) -> FilterOptions {
        let doctors = self.fixtures.doctors();
        FilterOptions {
            specialties: distinct(doctors.iter().map(|d| d.specialty.as_str())),
            locations: distinct(doctors.iter().map(|d| d.location.as_str())),
        }
    }

    pub fn get_doctor(&self, doctor_id: &str) -> Result<DoctorProfile, DoctorError> {
        self.fixtures
            .find_doctor(doctor_id)
            .cloned()
            .ok_or(DoctorError::NotFound)
    }
}

pub fn matches_filters(doctor: &DoctorProfile, filters: &DoctorSearchFilters) -> bool {
    let matches_search = filters.search_term().map_or(true, |term| {
        let term = term.to_lowercase();
        doctor.full_name().to_lowercase().contains(&term)
            || doctor.specialty.to_lowercase().contains(&term)
    });

    let matches_specialty = filters
        .specialty_term()
        .map_or(true, |specialty| doctor.specialty == specialty);
    let matches_location = filters
        .location_term()
        .map_or(true, |location| doctor.location == location);
    let matches_rating = doctor.rating >= filters.min_rating.unwrap_or(0.0);
    let matches_fee = filters
        .max_fee
        .map_or(true, |max_fee| doctor.consultation_fee <= max_fee);

    matches_search && matches_specialty && matches_location && matches_rating && matches_fee
}

// First-occurrence order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|v| v == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
