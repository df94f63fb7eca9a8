//! Cluster classification and conversion scoring for driver signups.
//!
//! A candidate is first matched against the ordered cluster rules; the winning
//! cluster's historical rate is then lifted by whichever feature adjustments
//! apply, capped at [`PROBABILITY_CEILING`].

mod adjustments;
mod config;
pub mod domain;
mod intake;
pub mod profile;
mod rules;

#[cfg(test)]
mod tests;

pub use adjustments::{
    AdjustmentFactor, AppliedAdjustment, FeatureAdjustmentRule, ADJUSTMENT_RULES,
};
pub use config::{ClusterBaseRates, PROBABILITY_CEILING};
pub use domain::{CandidateRecord, ClusterLabel, SignupChannel, UnknownChannel};
pub use intake::{CandidateForm, CandidateIntake, IntakeError};
pub use profile::{feature_importance, ClusterProfile, FeatureImportance, CLUSTER_PROFILES};
pub use rules::{ClusterClassifier, ClusterMatch, ClusterRule, CLUSTER_RULES};

use chrono::Datelike;
use serde::Serialize;

/// Stateless scorer combining the cluster base rate with feature adjustments.
#[derive(Debug, Clone)]
pub struct ConversionScorer {
    classifier: ClusterClassifier,
    base_rates: ClusterBaseRates,
    reference_year: i32,
}

impl ConversionScorer {
    /// Scorer whose "recent vehicle" check is measured from `reference_year`.
    pub fn new(reference_year: i32) -> Self {
        Self {
            classifier: ClusterClassifier::default(),
            base_rates: ClusterBaseRates::default(),
            reference_year,
        }
    }

    /// Scorer anchored to the current calendar year on the local clock.
    pub fn current() -> Self {
        Self::new(chrono::Local::now().year())
    }

    pub fn with_base_rates(mut self, base_rates: ClusterBaseRates) -> Self {
        self.base_rates = base_rates;
        self
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn base_rates(&self) -> &ClusterBaseRates {
        &self.base_rates
    }

    pub fn classifier(&self) -> &ClusterClassifier {
        &self.classifier
    }

    pub fn classify(&self, record: &CandidateRecord) -> ClusterLabel {
        self.classifier.classify(record)
    }

    pub fn score(&self, record: &CandidateRecord) -> PredictionResult {
        let cluster_scores = self.classifier.rank(record);
        let cluster = rules::best_match(&cluster_scores).cluster;
        let base_rate = self.base_rates.rate_for(cluster);

        let adjustments = adjustments::triggered(record, self.reference_year);
        let total_adjustment: f64 = adjustments.iter().map(|applied| applied.weight).sum();

        let mut explanation = Vec::with_capacity(adjustments.len() + 1);
        explanation.push(format!("Base cluster rate: {:.1}%", base_rate * 100.0));
        explanation.extend(adjustments.iter().map(|applied| applied.note.clone()));

        PredictionResult {
            cluster,
            cluster_label: cluster.label(),
            base_rate,
            total_adjustment,
            probability: capped_probability(base_rate, total_adjustment),
            explanation,
            adjustments,
            cluster_scores: cluster_scores.to_vec(),
        }
    }
}

fn capped_probability(base_rate: f64, total_adjustment: f64) -> f64 {
    (base_rate + total_adjustment).min(PROBABILITY_CEILING)
}

/// Forecast for a single candidate along with the trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub cluster: ClusterLabel,
    pub cluster_label: &'static str,
    pub base_rate: f64,
    pub total_adjustment: f64,
    pub probability: f64,
    pub explanation: Vec<String>,
    pub adjustments: Vec<AppliedAdjustment>,
    pub cluster_scores: Vec<ClusterMatch>,
}

impl PredictionResult {
    pub fn summary(&self) -> String {
        format!(
            "{} cluster, {:.1}% conversion probability",
            self.cluster_label,
            self.probability * 100.0
        )
    }
}
