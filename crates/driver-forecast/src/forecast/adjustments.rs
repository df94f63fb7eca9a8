use serde::{Deserialize, Serialize};

use super::domain::{CandidateRecord, SignupChannel};

const HIGH_PERFORMING_CITY: &str = "Wrouver";
const FAST_VEHICLE_GAP_DAYS: i64 = 2;
const QUICK_BACKGROUND_CHECK_DAYS: u32 = 3;
const RECENT_VEHICLE_YEARS: i32 = 5;

/// Observed feature that can lift a forecast above its cluster base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentFactor {
    FastVehicleVerification,
    QuickBackgroundCheck,
    ReferralChannel,
    MacSignup,
    HighPerformingCity,
    RecentVehicle,
}

impl AdjustmentFactor {
    pub fn applies(self, record: &CandidateRecord, reference_year: i32) -> bool {
        match self {
            Self::FastVehicleVerification => {
                record.vehicle_after_background_days() <= FAST_VEHICLE_GAP_DAYS
            }
            Self::QuickBackgroundCheck => {
                record.days_to_background_check <= QUICK_BACKGROUND_CHECK_DAYS
            }
            Self::ReferralChannel => record.signup_channel == SignupChannel::Referral,
            Self::MacSignup => record.signup_os == "Mac",
            Self::HighPerformingCity => record.city == HIGH_PERFORMING_CITY,
            Self::RecentVehicle => {
                reference_year.saturating_sub(record.vehicle_year) <= RECENT_VEHICLE_YEARS
            }
        }
    }
}

/// Additive weight attached to a factor, with the label used in explanations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureAdjustmentRule {
    pub factor: AdjustmentFactor,
    pub weight: f64,
    pub description: &'static str,
}

impl FeatureAdjustmentRule {
    pub fn note(&self) -> String {
        format!("{}: +{:.1}%", self.description, self.weight * 100.0)
    }
}

/// Adjustment rules in the order they are evaluated and explained.
pub const ADJUSTMENT_RULES: [FeatureAdjustmentRule; 6] = [
    FeatureAdjustmentRule {
        factor: AdjustmentFactor::FastVehicleVerification,
        weight: 0.15,
        description: "Fast vehicle verification",
    },
    FeatureAdjustmentRule {
        factor: AdjustmentFactor::QuickBackgroundCheck,
        weight: 0.10,
        description: "Quick background check",
    },
    FeatureAdjustmentRule {
        factor: AdjustmentFactor::ReferralChannel,
        weight: 0.05,
        description: "Referral channel",
    },
    FeatureAdjustmentRule {
        factor: AdjustmentFactor::MacSignup,
        weight: 0.02,
        description: "Mac OS user",
    },
    FeatureAdjustmentRule {
        factor: AdjustmentFactor::HighPerformingCity,
        weight: 0.02,
        description: "High-performing city",
    },
    FeatureAdjustmentRule {
        factor: AdjustmentFactor::RecentVehicle,
        weight: 0.01,
        description: "Recent vehicle",
    },
];

/// An adjustment that fired for a particular candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedAdjustment {
    pub factor: AdjustmentFactor,
    pub weight: f64,
    pub note: String,
}

pub(crate) fn triggered(record: &CandidateRecord, reference_year: i32) -> Vec<AppliedAdjustment> {
    ADJUSTMENT_RULES
        .iter()
        .filter(|rule| rule.factor.applies(record, reference_year))
        .map(|rule| AppliedAdjustment {
            factor: rule.factor,
            weight: rule.weight,
            note: rule.note(),
        })
        .collect()
}
