use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::SignupRecord;

pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Rows added by each "load more" request.
pub const PAGE_INCREMENT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CityName,
    SignupOs,
    SignupChannel,
    DaysToBgc,
    DaysToVehicle,
    VehicleMake,
    VehicleYear,
    StartedDriving,
}

impl SortField {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::CityName,
            Self::SignupOs,
            Self::SignupChannel,
            Self::DaysToBgc,
            Self::DaysToVehicle,
            Self::VehicleMake,
            Self::VehicleYear,
            Self::StartedDriving,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::CityName => "city_name",
            Self::SignupOs => "signup_os",
            Self::SignupChannel => "signup_channel",
            Self::DaysToBgc => "days_to_bgc",
            Self::DaysToVehicle => "days_to_vehicle",
            Self::VehicleMake => "vehicle_make",
            Self::VehicleYear => "vehicle_year",
            Self::StartedDriving => "started_driving",
        }
    }

    fn compare(self, a: &SignupRecord, b: &SignupRecord) -> Ordering {
        match self {
            Self::CityName => a.city_name.cmp(&b.city_name),
            Self::SignupOs => a.signup_os.cmp(&b.signup_os),
            Self::SignupChannel => a.signup_channel.label().cmp(b.signup_channel.label()),
            Self::DaysToBgc => a.days_to_bgc.cmp(&b.days_to_bgc),
            Self::DaysToVehicle => a.days_to_vehicle.cmp(&b.days_to_vehicle),
            Self::VehicleMake => a
                .vehicle_make
                .as_deref()
                .unwrap_or_default()
                .cmp(b.vehicle_make.as_deref().unwrap_or_default()),
            Self::VehicleYear => a.vehicle_year.cmp(&b.vehicle_year),
            Self::StartedDriving => a.started_driving.cmp(&b.started_driving),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort field '{0}'")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|field| field.key() == wanted)
            .ok_or_else(|| UnknownSortField(raw.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Search, sort and paging parameters for browsing the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreQuery {
    pub search: Option<String>,
    pub sort: SortField,
    pub direction: SortDirection,
    pub limit: usize,
}

impl Default for ExploreQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: SortField::default(),
            direction: SortDirection::default(),
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ExploreQuery {
    /// Same query with the window grown by one "load more" step.
    pub fn load_more(&self) -> Self {
        Self {
            limit: self.limit.saturating_add(PAGE_INCREMENT),
            ..self.clone()
        }
    }

    /// Clicking a column header: flips direction on the active field, otherwise sorts ascending.
    pub fn sort_by(&self, field: SortField) -> Self {
        let direction = if field == self.sort {
            self.direction.toggled()
        } else {
            SortDirection::Asc
        };
        Self {
            sort: field,
            direction,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorePage {
    pub total_matches: usize,
    pub limit: usize,
    pub has_more: bool,
    pub records: Vec<SignupRecord>,
}

pub(super) fn run(records: &[SignupRecord], query: &ExploreQuery) -> ExplorePage {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    let mut matches: Vec<&SignupRecord> = records
        .iter()
        .filter(|record| match needle.as_deref() {
            Some(needle) => matches_search(record, needle),
            None => true,
        })
        .collect();

    matches.sort_by(|a, b| match query.direction {
        SortDirection::Asc => query.sort.compare(a, b),
        SortDirection::Desc => query.sort.compare(b, a),
    });

    let total_matches = matches.len();
    ExplorePage {
        total_matches,
        limit: query.limit,
        has_more: query.limit < total_matches,
        records: matches.into_iter().take(query.limit).cloned().collect(),
    }
}

fn matches_search(record: &SignupRecord, needle: &str) -> bool {
    searchable_values(record)
        .iter()
        .any(|value| value.to_lowercase().contains(needle))
}

fn searchable_values(record: &SignupRecord) -> Vec<String> {
    let mut values = vec![
        record.city_name.clone(),
        record.signup_os.clone(),
        record.signup_channel.label().to_string(),
        record.signup_date.to_string(),
        record.days_to_bgc.to_string(),
        record.days_to_vehicle.to_string(),
        record.started_driving.to_string(),
    ];
    values.extend(record.vehicle_make.clone());
    values.extend(record.vehicle_model.clone());
    values.extend(record.vehicle_year.map(|year| year.to_string()));
    values.extend(record.first_completed_date.map(|date| date.to_string()));
    values
}
