//! Rule-based conversion forecasting for driver signups.
//!
//! [`forecast`] holds the classifier and scorer, [`dataset`] the historical
//! records behind the dashboards, and [`service`] ties both together for the
//! CLI and HTTP adapters.

pub mod config;
pub mod dataset;
pub mod error;
pub mod forecast;
pub mod router;
pub mod service;
pub mod telemetry;

pub use router::forecast_router;
pub use service::ForecastService;
