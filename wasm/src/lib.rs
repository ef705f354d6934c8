//! WebAssembly module for the Crop Cycle Planning client
//!
//! Provides client-side computation for:
//! - Timeline and weekly irrigation previews from stage predictions
//! - Crop list derivation from the model feature columns
//! - Sowing date validation and season lookup

use chrono::NaiveDate;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::schedule::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("crop-cycle-wasm ready"));
}

/// Build a crop schedule preview.
///
/// `predictions_json` is an ordered array of raw model outputs
/// `{"stage", "duration_days", "irrigation_need"}`. Outputs are clamped the
/// same way the server clamps them. Returns the schedule as JSON.
#[wasm_bindgen]
pub fn build_crop_schedule_json(predictions_json: &str, sow_date: &str) -> Result<String, JsValue> {
    preview_schedule(predictions_json, sow_date).map_err(|e| JsValue::from_str(&e))
}

/// Crop identifiers encoded in a feature column list
#[wasm_bindgen]
pub fn available_crops(columns_json: &str) -> Result<js_sys::Array, JsValue> {
    let crops = crops_from_columns(columns_json).map_err(|e| JsValue::from_str(&e))?;
    Ok(crops.into_iter().map(JsValue::from).collect())
}

/// Check a sowing date before submitting it
#[wasm_bindgen]
pub fn validate_sowing_date(value: &str) -> bool {
    parse_date(value).is_ok()
}

/// Season name for a sowing date, empty for an invalid date
#[wasm_bindgen]
pub fn season_for_sowing_date(value: &str) -> String {
    parse_date(value)
        .map(|date| Season::for_date(date).to_string())
        .unwrap_or_default()
}

/// Format an irrigation intensity the way the API does
#[wasm_bindgen]
pub fn format_irrigation(need: f64) -> String {
    format_irrigation_need(need)
}

/// Unclamped stage prediction as sent by the client
#[derive(Debug, Deserialize)]
struct RawStagePrediction {
    stage: String,
    duration_days: f64,
    irrigation_need: f64,
}

fn preview_schedule(predictions_json: &str, sow_date: &str) -> Result<String, String> {
    let raw: Vec<RawStagePrediction> = serde_json::from_str(predictions_json)
        .map_err(|e| format!("Invalid predictions JSON: {}", e))?;
    let predictions = raw
        .into_iter()
        .map(|p| {
            StagePrediction::from_raw(p.stage.as_str(), p.duration_days, p.irrigation_need)
                .ok_or_else(|| format!("Non-finite prediction for stage '{}'", p.stage))
        })
        .collect::<Result<Vec<_>, String>>()?;
    let sow_date: NaiveDate = parse_date(sow_date).map_err(str::to_string)?;

    let schedule = schedule_stages(&predictions, sow_date).map_err(|e| e.to_string())?;
    serde_json::to_string(&schedule).map_err(|e| e.to_string())
}

fn crops_from_columns(columns_json: &str) -> Result<Vec<String>, String> {
    let columns: Vec<String> = serde_json::from_str(columns_json)
        .map_err(|e| format!("Invalid feature columns JSON: {}", e))?;
    let schema = shared::FeatureSchema::new(&columns).map_err(|e| e.to_string())?;
    Ok(schema.crop_ids())
}
