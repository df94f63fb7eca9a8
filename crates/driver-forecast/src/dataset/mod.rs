//! Historical signup records and the read-only views derived from them.
//!
//! The bundled export is compiled into the crate; [`SignupDataset::from_path`]
//! loads an alternative CSV with the same columns.

mod explore;
mod options;
mod parser;
mod summary;

#[cfg(test)]
mod tests;

pub use explore::{
    ExplorePage, ExploreQuery, SortDirection, SortField, UnknownSortField, DEFAULT_PAGE_SIZE,
    PAGE_INCREMENT,
};
pub use options::FormOptions;
pub use summary::{
    ChannelConversion, DatasetOverview, MonthlyCompletions, RiskDistribution, TopCity,
};

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use crate::forecast::{SignupChannel, UnknownChannel};

const BUNDLED_CSV: &str = include_str!("../../data/signups.csv");

/// A single historical signup, as exported from the onboarding funnel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupRecord {
    pub id: u32,
    pub city_name: String,
    pub signup_os: String,
    pub signup_channel: SignupChannel,
    pub signup_date: NaiveDate,
    pub days_to_bgc: u32,
    pub days_to_vehicle: u32,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<i32>,
    /// `None` when the driver never completed a trip.
    pub first_completed_date: Option<NaiveDate>,
    pub started_driving: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read signup dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid signup CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("record {id}: {source}")]
    Channel {
        id: u32,
        #[source]
        source: UnknownChannel,
    },
    #[error("record {id}: '{value}' is not a YYYY-MM-DD date")]
    Date { id: u32, value: String },
}

/// Immutable collection of signup records.
#[derive(Debug, Clone, Default)]
pub struct SignupDataset {
    records: Vec<SignupRecord>,
}

impl SignupDataset {
    pub fn new(records: Vec<SignupRecord>) -> Self {
        Self { records }
    }

    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_reader(BUNDLED_CSV.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let records = parser::parse_records(reader)?;
        tracing::debug!(records = records.len(), "signup dataset loaded");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[SignupRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn overview(&self) -> DatasetOverview {
        DatasetOverview::from_records(&self.records)
    }

    pub fn form_options(&self, make: Option<&str>) -> FormOptions {
        FormOptions::from_records(&self.records, make)
    }

    pub fn explore(&self, query: &ExploreQuery) -> ExplorePage {
        explore::run(&self.records, query)
    }
}
