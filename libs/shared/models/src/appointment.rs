use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::doctor::DoctorProfile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Denormalized doctor snapshot.
    #[serde(default)]
    pub doctor: Option<DoctorProfile>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Pending -> Confirmed -> Completed, or Cancelled from any state before Completed.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Confirmed, Completed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus::*;
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
    }

    #[test]
    fn test_backward_and_terminal_transitions_rejected() {
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&Confirmed).unwrap(), "\"confirmed\"");
        assert_eq!(Cancelled.to_string(), "cancelled");
    }
}
