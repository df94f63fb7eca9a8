use driver_forecast::config::{AppConfig, ForecastSettings};
use driver_forecast::error::AppError;
use driver_forecast::ForecastService;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Forecast settings from the environment, with CLI overrides applied on top.
pub(crate) fn forecast_settings(
    csv: Option<PathBuf>,
    reference_year: Option<i32>,
) -> Result<ForecastSettings, AppError> {
    let mut settings = AppConfig::load()?.forecast;
    if csv.is_some() {
        settings.dataset_path = csv;
    }
    if reference_year.is_some() {
        settings.reference_year = reference_year;
    }
    Ok(settings)
}

pub(crate) fn load_service(
    csv: Option<PathBuf>,
    reference_year: Option<i32>,
) -> Result<ForecastService, AppError> {
    let settings = forecast_settings(csv, reference_year)?;
    Ok(ForecastService::from_settings(&settings)?)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
