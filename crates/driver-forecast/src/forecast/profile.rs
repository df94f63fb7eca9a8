use serde::Serialize;

use super::domain::ClusterLabel;

/// Display metadata for a cluster. Not consulted during scoring.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClusterProfile {
    pub cluster: ClusterLabel,
    pub cluster_label: &'static str,
    pub display_name: &'static str,
    pub historical_rate_pct: u8,
    pub traits: &'static [&'static str],
    pub color: &'static str,
}

impl ClusterProfile {
    pub fn for_cluster(cluster: ClusterLabel) -> &'static ClusterProfile {
        match cluster {
            ClusterLabel::VeryHigh => &CLUSTER_PROFILES[0],
            ClusterLabel::High => &CLUSTER_PROFILES[1],
            ClusterLabel::Medium => &CLUSTER_PROFILES[2],
            ClusterLabel::Low => &CLUSTER_PROFILES[3],
        }
    }
}

pub static CLUSTER_PROFILES: [ClusterProfile; 4] = [
    ClusterProfile {
        cluster: ClusterLabel::VeryHigh,
        cluster_label: ClusterLabel::VeryHigh.label(),
        display_name: "Cluster 0",
        historical_rate_pct: 44,
        traits: &[
            "Newer vehicles",
            "Fast onboarding (shortest BGC and vehicle add gaps)",
            "Significant portion of Paid signups",
            "Highest conversion among all clusters",
        ],
        color: "blue",
    },
    ClusterProfile {
        cluster: ClusterLabel::High,
        cluster_label: ClusterLabel::High.label(),
        display_name: "Cluster 3",
        historical_rate_pct: 27,
        traits: &[
            "Oldest vehicles",
            "Slower onboarding process",
            "Low OS diversity, concentrated in Strark",
            "Mid-low conversion but better than Cluster 2",
        ],
        color: "emerald",
    },
    ClusterProfile {
        cluster: ClusterLabel::Medium,
        cluster_label: ClusterLabel::Medium.label(),
        display_name: "Cluster 1",
        historical_rate_pct: 20,
        traits: &[
            "Mostly organic signups",
            "Longer onboarding gaps",
            "Moderate vehicle age",
            "Low engagement post-signup",
        ],
        color: "amber",
    },
    ClusterProfile {
        cluster: ClusterLabel::Low,
        cluster_label: ClusterLabel::Low.label(),
        display_name: "Cluster 2",
        historical_rate_pct: 7,
        traits: &[
            "Longest delays in onboarding",
            "Highest share of Paid signups (65%)",
            "Diverse OS and city profile",
            "Very low conversion despite high acquisition cost",
        ],
        color: "red",
    },
];

/// Relative influence of a feature in the offline model the rules were derived from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
    /// Importance relative to the strongest feature, 0 to 100.
    pub relative_pct: f64,
}

const FEATURE_IMPORTANCE: [(&str, f64); 10] = [
    ("Vehicle to Background Check Time", 0.40),
    ("Background Check to Signup Time", 0.10),
    ("Signup Channel (Referral)", 0.03),
    ("Signup Channel (Paid)", 0.025),
    ("Signup OS (Other)", 0.02),
    ("Signup OS (Mac)", 0.018),
    ("City (Wrouver)", 0.015),
    ("Signup OS (Windows)", 0.012),
    ("Vehicle Year", 0.01),
    ("Cluster", 0.008),
];

pub fn feature_importance() -> Vec<FeatureImportance> {
    let strongest = FEATURE_IMPORTANCE
        .iter()
        .map(|(_, importance)| *importance)
        .fold(0.0_f64, f64::max);

    FEATURE_IMPORTANCE
        .iter()
        .map(|(feature, importance)| FeatureImportance {
            feature: *feature,
            importance: *importance,
            relative_pct: if strongest > 0.0 {
                importance / strongest * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
