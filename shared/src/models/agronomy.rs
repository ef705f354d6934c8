//! Agronomic reference data models (growth stages, fertilizer, water balance)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Crop coefficient, either a single value or a display range such as `"0.4-1.15"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CropCoefficient {
    Value(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Range(String),
}

/// Reference growth stage with its crop coefficient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthStageInfo {
    pub stage: String,
    pub duration_days: u32,
    #[serde(rename = "Kc")]
    pub kc: CropCoefficient,
}

/// A planned irrigation event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationEvent {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_mm: Decimal,
    pub note: String,
}

/// Macronutrient applied by a fertilizer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nutrient {
    N,
    P,
    K,
}

/// How a fertilizer is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationMethod {
    Basal,
    TopDress,
}

/// A planned fertilizer application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerApplication {
    pub date: NaiveDate,
    pub nutrient: Nutrient,
    pub amount_kg_per_ha: u32,
    pub application: ApplicationMethod,
}

/// Season totals per nutrient (kg/ha)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilizerTotals {
    #[serde(rename = "N")]
    pub nitrogen: u32,
    #[serde(rename = "P")]
    pub phosphorus: u32,
    #[serde(rename = "K")]
    pub potassium: u32,
}

/// Season water balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBalanceSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_precipitation_mm: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_irrigation_mm: Decimal,
    #[serde(rename = "total_ET_mm", with = "rust_decimal::serde::float")]
    pub total_et_mm: Decimal,
}

/// Complete agronomic plan returned by the crop info endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropInfo {
    pub growth_stages: Vec<GrowthStageInfo>,
    pub irrigation_schedule: Vec<IrrigationEvent>,
    #[serde(with = "rust_decimal::serde::float")]
    pub irrigation_total_mm: Decimal,
    pub fertilizer_schedule: Vec<FertilizerApplication>,
    pub fertilizer_totals: FertilizerTotals,
    pub water_balance_summary: WaterBalanceSummary,
}

/// Irrigation events with the season total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationPlan {
    pub schedule: Vec<IrrigationEvent>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_irrigation_mm: Decimal,
}

/// Fertilizer events with per-nutrient totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerPlan {
    pub schedule: Vec<FertilizerApplication>,
    pub totals: FertilizerTotals,
}

impl CropInfo {
    pub fn irrigation_plan(&self) -> IrrigationPlan {
        IrrigationPlan {
            schedule: self.irrigation_schedule.clone(),
            total_irrigation_mm: self.irrigation_total_mm,
        }
    }

    pub fn fertilizer_plan(&self) -> FertilizerPlan {
        FertilizerPlan {
            schedule: self.fertilizer_schedule.clone(),
            totals: self.fertilizer_totals.clone(),
        }
    }
}
