//! Shared helpers for the HTTP and model store integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use crop_cycle_backend::external::{FixedEnvironment, LinearRegressor, ModelStatus, ModelStore, Regressor};
use crop_cycle_backend::{create_app, AppState, Config};
use serde_json::{json, Value};
use shared::{FeatureSchema, SoilReading, WeatherReading};
use tower::ServiceExt;

pub const FEATURE_COLUMNS: [&str; 9] = [
    "Year",
    "Sow_Month",
    "Temp_C",
    "Rainfall_mm",
    "Humidity_%",
    "SoilMoist_%",
    "Crop_Maize",
    "Crop_Rice",
    "Crop_Wheat",
];

pub const STAGES: [&str; 4] = ["Initial", "Development", "Mid-season", "Late-season"];

/// Stage durations (days) predicted for every crop
pub const STAGE_DAYS: [f64; 4] = [15.0, 25.0, 40.0, 30.0];

pub fn fixed_environment() -> FixedEnvironment {
    FixedEnvironment {
        weather: WeatherReading {
            temperature_c: 21.5,
            rainfall_mm: 12.25,
            humidity_percent: 58.0,
        },
        soil: SoilReading {
            moisture_percent: 27.5,
            nitrogen: 45.0,
            phosphorus: 22.0,
            potassium: 31.0,
            ph: 6.6,
        },
    }
}

/// In-memory store whose stage durations are fixed and irrigation needs
/// depend on the crop (Rice needs 10 more than the others)
pub fn test_store() -> ModelStore {
    let schema = FeatureSchema::new(FEATURE_COLUMNS).unwrap();
    let stages: Vec<String> = STAGES.iter().map(|s| s.to_string()).collect();

    let mut durations: HashMap<String, Arc<dyn Regressor>> = HashMap::new();
    let mut irrigations: HashMap<String, Arc<dyn Regressor>> = HashMap::new();

    for (stage, days) in stages.iter().zip(STAGE_DAYS) {
        let duration = LinearRegressor::bind(&schema, days, &HashMap::new()).unwrap();
        let irrigation = LinearRegressor::bind(
            &schema,
            14.0,
            &HashMap::from([("Crop_Rice".to_string(), 10.0)]),
        )
        .unwrap();
        durations.insert(stage.clone(), Arc::new(duration));
        irrigations.insert(stage.clone(), Arc::new(irrigation));
    }

    ModelStore::from_parts(schema, stages, durations, irrigations).unwrap()
}

pub fn build_test_app(models: ModelStatus) -> Router {
    let state = AppState::new(Config::default(), models)
        .with_environment(Arc::new(fixed_environment()));
    create_app(state)
}

pub fn ready_app() -> Router {
    build_test_app(ModelStatus::from(test_store()))
}

pub fn unavailable_app() -> Router {
    build_test_app(ModelStatus::Unavailable {
        reason: "Model directory not found: models".to_string(),
    })
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn linear_model(intercept: f64, coefficients: Value) -> Value {
    json!({ "intercept": intercept, "coefficients": coefficients })
}

/// Write a complete model directory for the four test stages
pub fn write_model_dir(dir: &Path) {
    write_json(&dir.join("feature_columns.json"), &json!(FEATURE_COLUMNS));
    write_json(&dir.join("stages.json"), &json!(STAGES));

    let slugs = ["initial", "development", "mid_season", "late_season"];
    for (slug, days) in slugs.iter().zip(STAGE_DAYS) {
        write_json(
            &dir.join(format!("{}_duration.json", slug)),
            &linear_model(days, json!({})),
        );
        write_json(
            &dir.join(format!("{}_irrigation.json", slug)),
            &linear_model(14.0, json!({ "Crop_Rice": 10.0 })),
        );
    }
}

pub fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}
