use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::dataset::{DatasetOverview, ExplorePage, ExploreQuery, FormOptions};
use crate::error::AppError;
use crate::forecast::{CandidateForm, PredictionResult};
use crate::service::{ClusterCatalog, ForecastService};

/// Router builder exposing prediction and dataset endpoints.
pub fn forecast_router(service: Arc<ForecastService>) -> Router {
    Router::new()
        .route("/api/v1/forecast/predict", post(predict_handler))
        .route("/api/v1/forecast/clusters", get(clusters_handler))
        .route("/api/v1/dataset/overview", get(overview_handler))
        .route("/api/v1/dataset/options", get(options_handler))
        .route("/api/v1/dataset/records", get(records_handler))
        .with_state(service)
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<ForecastService>>,
    Json(form): Json<CandidateForm>,
) -> Result<Json<PredictionResult>, AppError> {
    Ok(Json(service.predict(form)?))
}

pub(crate) async fn clusters_handler(
    State(service): State<Arc<ForecastService>>,
) -> Json<ClusterCatalog> {
    Json(service.clusters())
}

pub(crate) async fn overview_handler(
    State(service): State<Arc<ForecastService>>,
) -> Json<DatasetOverview> {
    Json(service.overview())
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OptionsParams {
    #[serde(default)]
    make: Option<String>,
}

pub(crate) async fn options_handler(
    State(service): State<Arc<ForecastService>>,
    Query(params): Query<OptionsParams>,
) -> Json<FormOptions> {
    Json(service.options(params.make.as_deref()))
}

pub(crate) async fn records_handler(
    State(service): State<Arc<ForecastService>>,
    Query(query): Query<ExploreQuery>,
) -> Json<ExplorePage> {
    Json(service.explore(&query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::dataset::SignupDataset;
    use crate::forecast::ConversionScorer;

    const FIXTURE_CSV: &str = "\
id,city_name,signup_os,signup_channel,signup_date,days_to_bgc,days_to_vehicle,vehicle_make,vehicle_model,vehicle_year,first_completed_date,started_driving
1,Strark,ios,Paid,2016-01-02,2,5,Toyota,Prius,2014,2016-01-20,true
2,Wrouver,android,Referral,2016-01-03,1,3,Honda,Civic,2015,2016-01-25,true
3,Berton,,Organic,2016-01-05,9,20,,,,1900-01-01,false
";

    fn router() -> Router {
        let dataset = SignupDataset::from_reader(FIXTURE_CSV.as_bytes()).expect("fixture parses");
        let service = ForecastService::new(ConversionScorer::new(2025), Arc::new(dataset));
        forecast_router(Arc::new(service))
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn predict_request(payload: Value) -> Request<Body> {
        Request::post("/api/v1/forecast/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn predict_route_scores_valid_forms() {
        let response = router()
            .oneshot(predict_request(json!({
                "city": "Wrouver",
                "signup_channel": "Referral",
                "signup_os": "ios",
                "days_to_background_check": 2,
                "days_to_vehicle_added": 3,
                "vehicle_year": 2021
            })))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["cluster"], "very_high");
        assert_eq!(payload["cluster_label"], "Very High");
        assert_eq!(payload["explanation"].as_array().map(Vec::len), Some(6));
        let probability = payload["probability"].as_f64().expect("probability");
        assert!((probability - 0.77).abs() < 1e-9);
    }

    #[tokio::test]
    async fn predict_route_rejects_invalid_forms() {
        let response = router()
            .oneshot(predict_request(json!({
                "city": "  ",
                "signup_channel": "Referral",
                "days_to_background_check": 2,
                "days_to_vehicle_added": 3,
                "vehicle_year": 2021
            })))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = read_json_body(response).await;
        assert_eq!(payload["error"], "invalid candidate: city is required");
    }

    #[tokio::test]
    async fn clusters_route_lists_four_clusters() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/forecast/clusters")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["reference_year"], 2025);
        assert_eq!(payload["clusters"].as_array().map(Vec::len), Some(4));
        assert_eq!(payload["clusters"][0]["profile"]["display_name"], "Cluster 0");
    }

    #[tokio::test]
    async fn overview_route_summarises_dataset() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/dataset/overview")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        let payload = read_json_body(response).await;
        assert_eq!(payload["total_signups"], 3);
        assert_eq!(payload["active_drivers"], 2);
        assert_eq!(payload["top_city"]["city"], "Strark");
    }

    #[tokio::test]
    async fn options_route_filters_by_make() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/dataset/options?make=Honda")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        let payload = read_json_body(response).await;
        assert_eq!(payload["vehicle_models"], json!(["Civic"]));
        assert_eq!(payload["vehicle_years"], json!([2015]));
        assert_eq!(payload["cities"], json!(["Berton", "Strark", "Wrouver"]));
    }

    #[tokio::test]
    async fn records_route_applies_query() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/dataset/records?sort=days_to_bgc&direction=desc&limit=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["total_matches"], 3);
        assert_eq!(payload["has_more"], true);
        assert_eq!(payload["records"][0]["id"], 3);
        assert_eq!(payload["records"][1]["id"], 1);
    }

    #[tokio::test]
    async fn records_route_rejects_unknown_sort_field() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/dataset/records?sort=id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
