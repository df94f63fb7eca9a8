use serde::Serialize;
use std::sync::Arc;

use crate::config::ForecastSettings;
use crate::dataset::{
    DatasetError, DatasetOverview, ExplorePage, ExploreQuery, FormOptions, SignupDataset,
};
use crate::forecast::{
    feature_importance, CandidateForm, CandidateIntake, CandidateRecord, ClusterProfile,
    ClusterRule, ConversionScorer, FeatureImportance, IntakeError, PredictionResult,
};

/// Entry point shared by the CLI and HTTP adapters.
#[derive(Debug, Clone)]
pub struct ForecastService {
    scorer: ConversionScorer,
    intake: CandidateIntake,
    dataset: Arc<SignupDataset>,
}

impl ForecastService {
    pub fn new(scorer: ConversionScorer, dataset: Arc<SignupDataset>) -> Self {
        Self {
            scorer,
            intake: CandidateIntake,
            dataset,
        }
    }

    /// Loads the configured dataset (bundled by default) and pins the reference year if set.
    pub fn from_settings(settings: &ForecastSettings) -> Result<Self, DatasetError> {
        let dataset = match &settings.dataset_path {
            Some(path) => SignupDataset::from_path(path)?,
            None => SignupDataset::bundled()?,
        };
        let scorer = match settings.reference_year {
            Some(year) => ConversionScorer::new(year),
            None => ConversionScorer::current(),
        };
        tracing::info!(
            records = dataset.len(),
            reference_year = scorer.reference_year(),
            custom_dataset = settings.dataset_path.is_some(),
            "forecast service initialised"
        );
        Ok(Self::new(scorer, Arc::new(dataset)))
    }

    pub fn scorer(&self) -> &ConversionScorer {
        &self.scorer
    }

    pub fn dataset(&self) -> &SignupDataset {
        &self.dataset
    }

    pub fn predict(&self, form: CandidateForm) -> Result<PredictionResult, IntakeError> {
        let record = self.intake.record_from_form(form).map_err(|err| {
            tracing::debug!(error = %err, "candidate form rejected");
            err
        })?;
        Ok(self.predict_record(&record))
    }

    pub fn predict_record(&self, record: &CandidateRecord) -> PredictionResult {
        let result = self.scorer.score(record);
        tracing::debug!(
            cluster = result.cluster_label,
            probability = result.probability,
            adjustments = result.adjustments.len(),
            "candidate scored"
        );
        result
    }

    pub fn clusters(&self) -> ClusterCatalog {
        let rules = self.scorer.classifier().rules();
        let clusters = rules
            .iter()
            .map(|rule| ClusterOverview {
                profile: *ClusterProfile::for_cluster(rule.label),
                rule: *rule,
                base_rate: self.scorer.base_rates().rate_for(rule.label),
            })
            .collect();

        ClusterCatalog {
            reference_year: self.scorer.reference_year(),
            clusters,
            feature_importance: feature_importance(),
        }
    }

    pub fn overview(&self) -> DatasetOverview {
        self.dataset.overview()
    }

    pub fn options(&self, make: Option<&str>) -> FormOptions {
        self.dataset.form_options(make)
    }

    pub fn explore(&self, query: &ExploreQuery) -> ExplorePage {
        self.dataset.explore(query)
    }
}

/// Everything needed to describe the clusters to a reader.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterCatalog {
    pub reference_year: i32,
    pub clusters: Vec<ClusterOverview>,
    pub feature_importance: Vec<FeatureImportance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterOverview {
    pub profile: ClusterProfile,
    pub rule: ClusterRule,
    pub base_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{ClusterLabel, SignupChannel};

    fn service() -> ForecastService {
        ForecastService::new(
            ConversionScorer::new(2025),
            Arc::new(SignupDataset::bundled().expect("bundled dataset")),
        )
    }

    fn form() -> CandidateForm {
        CandidateForm {
            city: "Wrouver".to_string(),
            signup_channel: "referral".to_string(),
            signup_os: "ios".to_string(),
            days_to_background_check: 2.0,
            days_to_vehicle_added: 3.0,
            vehicle_year: 2021,
            vehicle_make: None,
            vehicle_model: None,
        }
    }

    #[test]
    fn predict_validates_then_scores() {
        let result = service().predict(form()).expect("form is valid");
        assert_eq!(result.cluster, ClusterLabel::VeryHigh);
        assert!((result.probability - 0.77).abs() < 1e-9);
    }

    #[test]
    fn predict_surfaces_intake_errors() {
        let mut raw = form();
        raw.signup_channel = "Radio".to_string();
        assert!(matches!(
            service().predict(raw),
            Err(IntakeError::UnknownChannel(_))
        ));
    }

    #[test]
    fn predict_record_matches_scorer() {
        let service = service();
        let record = CandidateRecord {
            city: "Berton".to_string(),
            signup_channel: SignupChannel::Organic,
            signup_os: "Mac".to_string(),
            days_to_background_check: 4,
            days_to_vehicle_added: 5,
            vehicle_year: 2018,
        };
        assert_eq!(
            service.predict_record(&record),
            service.scorer().score(&record)
        );
    }

    #[test]
    fn catalog_lists_clusters_in_evaluation_order() {
        let catalog = service().clusters();
        let labels: Vec<ClusterLabel> = catalog.clusters.iter().map(|c| c.rule.label).collect();
        assert_eq!(labels, ClusterLabel::ordered().to_vec());
        assert_eq!(catalog.clusters.len(), 4);
        assert_eq!(catalog.clusters[0].profile.display_name, "Cluster 0");
        assert_eq!(catalog.clusters[3].base_rate, 0.07);
        assert_eq!(catalog.feature_importance.len(), 10);
    }

    #[test]
    fn from_settings_reports_missing_dataset() {
        let settings = ForecastSettings {
            dataset_path: Some("/nonexistent/signups.csv".into()),
            reference_year: Some(2024),
        };
        assert!(matches!(
            ForecastService::from_settings(&settings),
            Err(DatasetError::Io(_))
        ));
    }

    #[test]
    fn from_settings_pins_reference_year() {
        let settings = ForecastSettings {
            dataset_path: None,
            reference_year: Some(2019),
        };
        let service = ForecastService::from_settings(&settings).expect("bundled dataset");
        assert_eq!(service.scorer().reference_year(), 2019);
        assert!(!service.dataset().is_empty());
    }
}
