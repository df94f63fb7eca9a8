use serde::{Deserialize, Serialize};

use super::domain::ClusterLabel;

/// Hard ceiling applied to every forecast so no candidate reads as certain.
pub const PROBABILITY_CEILING: f64 = 0.95;

/// Historical conversion rate per cluster, as fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterBaseRates {
    pub very_high: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for ClusterBaseRates {
    fn default() -> Self {
        Self {
            very_high: 0.44,
            high: 0.27,
            medium: 0.20,
            low: 0.07,
        }
    }
}

impl ClusterBaseRates {
    pub fn rate_for(&self, cluster: ClusterLabel) -> f64 {
        match cluster {
            ClusterLabel::VeryHigh => self.very_high,
            ClusterLabel::High => self.high,
            ClusterLabel::Medium => self.medium,
            ClusterLabel::Low => self.low,
        }
    }

    /// Rates paired with their cluster, in evaluation order.
    pub fn entries(&self) -> [(ClusterLabel, f64); 4] {
        ClusterLabel::ordered().map(|cluster| (cluster, self.rate_for(cluster)))
    }
}
