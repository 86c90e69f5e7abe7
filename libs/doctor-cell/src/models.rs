use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Criteria narrowing the doctor roster. `None` and blank strings match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorSearchFilters {
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub min_rating: Option<f32>,
    pub max_fee: Option<f64>,
}

impl DoctorSearchFilters {
    pub fn with_specialty(mut self, specialty: &str) -> Self {
        self.specialty = Some(specialty.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn with_max_fee(mut self, max_fee: f64) -> Self {
        self.max_fee = Some(max_fee);
        self
    }

    pub fn validate(&self) -> Result<(), DoctorError> {
        if let Some(rating) = self.min_rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(DoctorError::ValidationError(format!(
                    "min_rating must be between 0 and 5, got {}",
                    rating
                )));
            }
        }
        if let Some(fee) = self.max_fee {
            if !fee.is_finite() || fee < 0.0 {
                return Err(DoctorError::ValidationError(format!(
                    "max_fee must be a non-negative number, got {}",
                    fee
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn specialty_term(&self) -> Option<&str> {
        non_blank(&self.specialty)
    }

    pub(crate) fn location_term(&self) -> Option<&str> {
        non_blank(&self.location)
    }

    pub(crate) fn search_term(&self) -> Option<&str> {
        non_blank(&self.search)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Distinct specialty and location values offered as filter choices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub specialties: Vec<String>,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),
}
