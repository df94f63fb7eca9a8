use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::{DatasetError, SignupRecord};

const DEFAULT_SIGNUP_OS: &str = "Other";
const NEVER_COMPLETED_YEAR: i32 = 1900;

pub(super) fn parse_records<R: Read>(reader: R) -> Result<Vec<SignupRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<SignupRow>() {
        records.push(row?.into_record()?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct SignupRow {
    id: u32,
    city_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    signup_os: Option<String>,
    signup_channel: String,
    signup_date: String,
    days_to_bgc: u32,
    days_to_vehicle: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    vehicle_make: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    vehicle_model: Option<String>,
    #[serde(default)]
    vehicle_year: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    first_completed_date: Option<String>,
    started_driving: bool,
}

impl SignupRow {
    fn into_record(self) -> Result<SignupRecord, DatasetError> {
        let id = self.id;
        let signup_channel = self
            .signup_channel
            .parse()
            .map_err(|source| DatasetError::Channel { id, source })?;
        let signup_date = parse_date(id, &self.signup_date)?;
        let first_completed_date = match self.first_completed_date.as_deref() {
            Some(raw) => Some(parse_date(id, raw)?).filter(|date| date.year() != NEVER_COMPLETED_YEAR),
            None => None,
        };

        Ok(SignupRecord {
            id,
            city_name: self.city_name,
            signup_os: self
                .signup_os
                .unwrap_or_else(|| DEFAULT_SIGNUP_OS.to_string()),
            signup_channel,
            signup_date,
            days_to_bgc: self.days_to_bgc,
            days_to_vehicle: self.days_to_vehicle,
            vehicle_make: self.vehicle_make,
            vehicle_model: self.vehicle_model,
            vehicle_year: self.vehicle_year,
            first_completed_date,
            started_driving: self.started_driving,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(id: u32, value: &str) -> Result<NaiveDate, DatasetError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| DatasetError::Date {
        id,
        value: value.to_string(),
    })
}
