//! HTTP handlers for the reference crop plan endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use shared::{
    CropInfo, CropInfoRequest, FertilizerPlan, GrowthStageInfo, IrrigationPlan,
    WaterBalanceSummary,
};
use validator::Validate;

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Root endpoint
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Crop Prediction API is running!".to_string(),
    })
}

/// Full crop plan for a crop type and planting date
pub async fn get_crop_info(
    State(state): State<AppState>,
    payload: Result<Json<CropInfoRequest>, JsonRejection>,
) -> AppResult<Json<CropInfo>> {
    let Json(input) = payload?;
    input.validate()?;

    tracing::debug!(
        crop_type = input.crop_type.as_deref().unwrap_or_default(),
        planting_date = input.planting_date.as_deref().unwrap_or_default(),
        "Crop info requested"
    );

    Ok(Json(state.crop_info.as_ref().clone()))
}

/// Growth stages of the reference plan
pub async fn get_growth_stages(State(state): State<AppState>) -> Json<Vec<GrowthStageInfo>> {
    Json(state.crop_info.growth_stages.clone())
}

/// Irrigation schedule with season total
pub async fn get_irrigation_schedule(State(state): State<AppState>) -> Json<IrrigationPlan> {
    Json(state.crop_info.irrigation_plan())
}

/// Fertilizer schedule with per-nutrient totals
pub async fn get_fertilizer_schedule(State(state): State<AppState>) -> Json<FertilizerPlan> {
    Json(state.crop_info.fertilizer_plan())
}

/// Season water balance
pub async fn get_water_balance_summary(
    State(state): State<AppState>,
) -> Json<WaterBalanceSummary> {
    Json(state.crop_info.water_balance_summary.clone())
}
