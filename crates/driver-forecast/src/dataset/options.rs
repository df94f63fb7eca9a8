use serde::Serialize;
use std::collections::BTreeSet;

use super::SignupRecord;

/// Choices offered by the prediction form, drawn from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormOptions {
    pub cities: Vec<String>,
    pub signup_os: Vec<String>,
    pub vehicle_makes: Vec<String>,
    /// Models of the selected make, or of every make when none is selected.
    pub vehicle_models: Vec<String>,
    /// Newest first; filtered by the selected make like `vehicle_models`.
    pub vehicle_years: Vec<i32>,
}

impl FormOptions {
    pub fn from_records(records: &[SignupRecord], make: Option<&str>) -> Self {
        let make = make.map(str::trim).filter(|make| !make.is_empty());
        let matches_make = |record: &&SignupRecord| match make {
            Some(make) => record.vehicle_make.as_deref() == Some(make),
            None => true,
        };

        let years: BTreeSet<i32> = records
            .iter()
            .filter(matches_make)
            .filter_map(|r| r.vehicle_year)
            .collect();

        Self {
            cities: unique(records.iter().map(|r| r.city_name.as_str())),
            signup_os: unique(records.iter().map(|r| r.signup_os.as_str())),
            vehicle_makes: unique(records.iter().filter_map(|r| r.vehicle_make.as_deref())),
            vehicle_models: unique(
                records
                    .iter()
                    .filter(matches_make)
                    .filter_map(|r| r.vehicle_model.as_deref()),
            ),
            vehicle_years: years.into_iter().rev().collect(),
        }
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
