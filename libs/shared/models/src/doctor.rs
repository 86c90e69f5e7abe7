use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Doctor,
    Admin,
}

/// Identity snapshot linked to a doctor record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorProfile {
    pub id: String,
    pub user_id: String,
    pub specialty: String,
    pub experience_years: u32,
    pub qualification: String,
    pub bio: String,
    pub consultation_fee: f64,
    pub location: String,
    pub rating: f32,
    pub total_reviews: u32,
    // Not consulted by search or booking.
    pub is_approved: bool,
    /// Bookable time labels ("HH:MM"), in display order.
    pub availability: Vec<String>,
    pub profile_image: Option<String>,
    pub user: Option<UserProfile>,
}

impl DoctorProfile {
    pub fn full_name(&self) -> &str {
        self.user.as_ref().map(|u| u.full_name.as_str()).unwrap_or("")
    }

    pub fn offers_time(&self, label: &str) -> bool {
        self.availability.iter().any(|slot| slot == label)
    }

    /// Fee as shown to patients: "$200", or "$99.50" when fractional.
    pub fn formatted_fee(&self) -> String {
        format_fee(self.consultation_fee)
    }
}

pub fn format_fee(fee: f64) -> String {
    if fee.fract() == 0.0 {
        format!("${:.0}", fee)
    } else {
        format!("${:.2}", fee)
    }
}
