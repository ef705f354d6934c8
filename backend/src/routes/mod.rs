//! Route definitions for the crop cycle planning API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Reference crop plan
        .merge(crop_info_routes())
        // Model-backed prediction
        .merge(prediction_routes())
}

/// Reference crop plan routes
fn crop_info_routes() -> Router<AppState> {
    Router::new()
        .route("/crop-info", post(handlers::get_crop_info))
        .route("/growth-stages", get(handlers::get_growth_stages))
        .route("/irrigation-schedule", get(handlers::get_irrigation_schedule))
        .route("/fertilizer-schedule", get(handlers::get_fertilizer_schedule))
        .route("/water-balance-summary", get(handlers::get_water_balance_summary))
}

/// Prediction routes
fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/predict-crop-cycle", post(handlers::predict_crop_cycle))
        .route("/crops", get(handlers::list_crops))
}
