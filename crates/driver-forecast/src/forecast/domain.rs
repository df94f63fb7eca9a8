use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Acquisition channel recorded when the driver signed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignupChannel {
    Organic,
    Referral,
    Paid,
}

impl SignupChannel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Organic, Self::Referral, Self::Paid]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Organic => "Organic",
            Self::Referral => "Referral",
            Self::Paid => "Paid",
        }
    }
}

impl fmt::Display for SignupChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a channel string does not name one of the known channels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown signup channel '{0}' (expected Organic, Referral or Paid)")]
pub struct UnknownChannel(pub String);

impl FromStr for SignupChannel {
    type Err = UnknownChannel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "organic" => Ok(Self::Organic),
            "referral" => Ok(Self::Referral),
            "paid" => Ok(Self::Paid),
            _ => Err(UnknownChannel(raw.trim().to_string())),
        }
    }
}

/// Ordinal conversion segment a candidate is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterLabel {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl ClusterLabel {
    /// Evaluation order used when cluster scores tie.
    pub const fn ordered() -> [Self; 4] {
        [Self::VeryHigh, Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Well-formed candidate the classifier and scorer operate on.
///
/// Values are trusted as-is; use [`super::CandidateIntake`] to build one from
/// raw form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub city: String,
    pub signup_channel: SignupChannel,
    pub signup_os: String,
    pub days_to_background_check: u32,
    pub days_to_vehicle_added: u32,
    pub vehicle_year: i32,
}

impl CandidateRecord {
    /// Days between the background check and the vehicle being added. Negative
    /// when the vehicle was registered first.
    pub fn vehicle_after_background_days(&self) -> i64 {
        i64::from(self.days_to_vehicle_added) - i64::from(self.days_to_background_check)
    }
}
