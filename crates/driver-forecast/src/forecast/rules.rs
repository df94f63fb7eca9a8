use serde::Serialize;

use super::domain::{CandidateRecord, ClusterLabel, SignupChannel};

const BACKGROUND_CHECK_POINTS: u8 = 2;
const VEHICLE_DAYS_POINTS: u8 = 2;
const VEHICLE_YEAR_POINTS: u8 = 1;
const CHANNEL_POINTS: u8 = 2;
const CITY_POINTS: u8 = 2;

/// Thresholds and preferences describing one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterRule {
    pub label: ClusterLabel,
    /// Inclusive upper bound; `None` is unbounded.
    pub max_background_check_days: Option<u32>,
    /// Inclusive upper bound; `None` is unbounded.
    pub max_vehicle_days: Option<u32>,
    pub min_vehicle_year: i32,
    pub preferred_channels: &'static [SignupChannel],
    pub preferred_cities: &'static [&'static str],
}

impl ClusterRule {
    pub const MAX_SCORE: u8 = BACKGROUND_CHECK_POINTS
        + VEHICLE_DAYS_POINTS
        + VEHICLE_YEAR_POINTS
        + CHANNEL_POINTS
        + CITY_POINTS;

    /// Points the record earns against this rule, between 0 and [`Self::MAX_SCORE`].
    pub fn score(&self, record: &CandidateRecord) -> u8 {
        let mut score = 0;

        if within(record.days_to_background_check, self.max_background_check_days) {
            score += BACKGROUND_CHECK_POINTS;
        }
        if within(record.days_to_vehicle_added, self.max_vehicle_days) {
            score += VEHICLE_DAYS_POINTS;
        }
        if record.vehicle_year >= self.min_vehicle_year {
            score += VEHICLE_YEAR_POINTS;
        }
        if self.preferred_channels.contains(&record.signup_channel) {
            score += CHANNEL_POINTS;
        }
        if self
            .preferred_cities
            .iter()
            .any(|city| *city == record.city.as_str())
        {
            score += CITY_POINTS;
        }

        score
    }
}

fn within(days: u32, bound: Option<u32>) -> bool {
    bound.map_or(true, |max| days <= max)
}

/// Cluster rules in evaluation order. The last entry is the catch-all.
pub static CLUSTER_RULES: [ClusterRule; 4] = [
    ClusterRule {
        label: ClusterLabel::VeryHigh,
        max_background_check_days: Some(2),
        max_vehicle_days: Some(4),
        min_vehicle_year: 2020,
        preferred_channels: &[SignupChannel::Referral],
        preferred_cities: &["Wrouver", "Strark"],
    },
    ClusterRule {
        label: ClusterLabel::High,
        max_background_check_days: Some(4),
        max_vehicle_days: Some(7),
        min_vehicle_year: 2018,
        preferred_channels: &[SignupChannel::Organic, SignupChannel::Referral],
        preferred_cities: &["Wrouver", "Strark", "Berton"],
    },
    ClusterRule {
        label: ClusterLabel::Medium,
        max_background_check_days: Some(7),
        max_vehicle_days: Some(10),
        min_vehicle_year: 2015,
        preferred_channels: &[SignupChannel::Organic, SignupChannel::Paid],
        preferred_cities: &["Strark", "Berton"],
    },
    ClusterRule {
        label: ClusterLabel::Low,
        max_background_check_days: None,
        max_vehicle_days: None,
        min_vehicle_year: 0,
        preferred_channels: &[],
        preferred_cities: &[],
    },
];

/// Score a record earned against a single cluster rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterMatch {
    pub cluster: ClusterLabel,
    pub score: u8,
}

/// Assigns candidates to the cluster whose rule they match best.
#[derive(Debug, Clone, Copy)]
pub struct ClusterClassifier {
    rules: &'static [ClusterRule; 4],
}

impl Default for ClusterClassifier {
    fn default() -> Self {
        Self {
            rules: &CLUSTER_RULES,
        }
    }
}

impl ClusterClassifier {
    pub fn rules(&self) -> &'static [ClusterRule; 4] {
        self.rules
    }

    /// Scores against every rule, in evaluation order.
    pub fn rank(&self, record: &CandidateRecord) -> [ClusterMatch; 4] {
        (*self.rules).map(|rule| ClusterMatch {
            cluster: rule.label,
            score: rule.score(record),
        })
    }

    /// Highest-scoring cluster; the earliest rule wins a tie.
    pub fn classify(&self, record: &CandidateRecord) -> ClusterLabel {
        best_match(&self.rank(record)).cluster
    }
}

pub(crate) fn best_match(matches: &[ClusterMatch; 4]) -> ClusterMatch {
    let mut best = matches[0];
    for candidate in &matches[1..] {
        if candidate.score > best.score {
            best = *candidate;
        }
    }
    best
}
