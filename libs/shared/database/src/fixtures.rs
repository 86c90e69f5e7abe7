use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use shared_models::{Appointment, DoctorProfile};

const DOCTORS_JSON: &str = include_str!("../fixtures/doctors.json");
const APPOINTMENTS_JSON: &str = include_str!("../fixtures/appointments.json");

/// Read-only doctor and appointment rosters, loaded once at startup.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    doctors: Vec<DoctorProfile>,
    appointments: Vec<Appointment>,
}

impl FixtureStore {
    /// Loads the rosters bundled with the crate.
    pub fn load() -> Result<Self> {
        Self::from_json(DOCTORS_JSON, APPOINTMENTS_JSON)
    }

    pub fn from_json(doctors_json: &str, appointments_json: &str) -> Result<Self> {
        let doctors: Vec<DoctorProfile> =
            serde_json::from_str(doctors_json).context("Failed to parse doctor roster")?;
        let appointments: Vec<Appointment> = serde_json::from_str(appointments_json)
            .context("Failed to parse appointment roster")?;

        let store = Self::new(doctors, appointments)?;
        info!(
            "Loaded fixture roster: {} doctors, {} appointments",
            store.doctors.len(),
            store.appointments.len()
        );
        Ok(store)
    }

    /// Builds a store, attaching each appointment's doctor snapshot.
    pub fn new(doctors: Vec<DoctorProfile>, appointments: Vec<Appointment>) -> Result<Self> {
        let appointments = appointments
            .into_iter()
            .map(|mut appointment| {
                let doctor = doctors
                    .iter()
                    .find(|d| d.id == appointment.doctor_id)
                    .ok_or_else(|| {
                        anyhow!(
                            "Appointment {} references unknown doctor {}",
                            appointment.id,
                            appointment.doctor_id
                        )
                    })?;
                appointment.doctor = Some(doctor.clone());
                Ok(appointment)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            doctors,
            appointments,
        })
    }

    pub fn doctors(&self) -> &[DoctorProfile] {
        &self.doctors
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn find_doctor(&self, doctor_id: &str) -> Option<&DoctorProfile> {
        debug!("Looking up doctor {}", doctor_id);
        self.doctors.iter().find(|d| d.id == doctor_id)
    }

    pub fn find_appointment(&self, appointment_id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == appointment_id)
    }
}
