//! HTTP handlers for model-backed crop cycle prediction

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{parse_date, PredictCropCycleRequest};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::{ExportService, PredictionService};
use crate::AppState;

/// Output format selector
#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Predict the growth timeline and irrigation schedule for a sowing
pub async fn predict_crop_cycle(
    State(state): State<AppState>,
    query: Result<Query<FormatQuery>, QueryRejection>,
    payload: Result<Json<PredictCropCycleRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let Json(input) = payload?;
    input.validate()?;

    let crop_type = input.crop_type.unwrap_or_default();
    let sowing_date = input.sowing_date.unwrap_or_default();
    let sow_date =
        parse_date(&sowing_date).map_err(|msg| AppError::invalid_field("sowing_date", msg))?;

    let store = state.models.require()?;
    let result = PredictionService::new(store, state.environment.as_ref())
        .predict_crop_cycle(&crop_type, sow_date)?;

    if query.format.as_deref() == Some("csv") {
        let csv = ExportService::export_to_csv(&result.irrigation_schedule)?;
        let disposition = format!(
            "attachment; filename=\"irrigation_schedule_{}_{}.csv\"",
            result.crop.replace(|c: char| !c.is_ascii_alphanumeric(), "_"),
            result.sow_date
        );
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(result).into_response())
    }
}

#[derive(Debug, Serialize)]
pub struct CropsResponse {
    pub crops: Vec<String>,
}

/// Crop types the loaded models were trained on
pub async fn list_crops(State(state): State<AppState>) -> AppResult<Json<CropsResponse>> {
    let store = state.models.require()?;
    Ok(Json(CropsResponse {
        crops: store.crop_ids(),
    }))
}
