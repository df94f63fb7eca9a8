use serde::{Deserialize, Serialize};

use super::domain::{CandidateRecord, SignupChannel, UnknownChannel};

const DEFAULT_SIGNUP_OS: &str = "Other";
const MIN_VEHICLE_YEAR: i32 = 1900;
const MAX_VEHICLE_YEAR: i32 = 9999;

/// Raw prediction form as collected from a user or JSON client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateForm {
    pub city: String,
    pub signup_channel: String,
    #[serde(default)]
    pub signup_os: String,
    pub days_to_background_check: f64,
    pub days_to_vehicle_added: f64,
    pub vehicle_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
}

/// Reasons a form cannot become a [`CandidateRecord`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("city is required")]
    MissingCity,
    #[error(transparent)]
    UnknownChannel(#[from] UnknownChannel),
    #[error("{field} must be a non-negative number of days (found {value})")]
    InvalidDays { field: &'static str, value: f64 },
    #[error("vehicle year {0} is outside 1900..=9999")]
    InvalidVehicleYear(i32),
}

/// Boundary validation in front of the classifier and scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateIntake;

impl CandidateIntake {
    pub fn record_from_form(&self, form: CandidateForm) -> Result<CandidateRecord, IntakeError> {
        let city = form.city.trim();
        if city.is_empty() {
            return Err(IntakeError::MissingCity);
        }

        let signup_channel: SignupChannel = form.signup_channel.parse()?;

        let days_to_background_check =
            whole_days("days_to_background_check", form.days_to_background_check)?;
        let days_to_vehicle_added =
            whole_days("days_to_vehicle_added", form.days_to_vehicle_added)?;

        if !(MIN_VEHICLE_YEAR..=MAX_VEHICLE_YEAR).contains(&form.vehicle_year) {
            return Err(IntakeError::InvalidVehicleYear(form.vehicle_year));
        }

        let signup_os = match form.signup_os.trim() {
            "" => DEFAULT_SIGNUP_OS.to_string(),
            os => os.to_string(),
        };

        Ok(CandidateRecord {
            city: city.to_string(),
            signup_channel,
            signup_os,
            days_to_background_check,
            days_to_vehicle_added,
            vehicle_year: form.vehicle_year,
        })
    }
}

fn whole_days(field: &'static str, value: f64) -> Result<u32, IntakeError> {
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(IntakeError::InvalidDays { field, value });
    }
    // Partial days round up so `days <= limit` agrees with the raw value.
    Ok(value.ceil() as u32)
}
