//! Crop cycle timeline and irrigation models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SoilReading, WeatherReading};

/// Unit label appended to formatted irrigation needs
pub const IRRIGATION_UNIT: &str = "lphw";

/// Minimum predicted stage duration in days
pub const MIN_STAGE_DAYS: u32 = 1;

/// Minimum predicted irrigation intensity
pub const MIN_IRRIGATION_NEED: f64 = 0.1;

/// Model output for a single growth stage, already clamped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagePrediction {
    pub stage: String,
    pub duration_days: u32,
    pub irrigation_need: f64,
}

impl StagePrediction {
    /// Build a prediction from raw regressor outputs.
    ///
    /// The duration is floored and clamped to at least one day, the
    /// irrigation need is clamped to at least 0.1. Returns `None` when either
    /// raw value is not finite.
    pub fn from_raw(stage: impl Into<String>, raw_duration: f64, raw_irrigation: f64) -> Option<Self> {
        if !raw_duration.is_finite() || !raw_irrigation.is_finite() {
            return None;
        }

        let floored = raw_duration.floor();
        let duration_days = if floored < MIN_STAGE_DAYS as f64 {
            MIN_STAGE_DAYS
        } else if floored > u32::MAX as f64 {
            u32::MAX
        } else {
            floored as u32
        };

        Some(Self {
            stage: stage.into(),
            duration_days,
            irrigation_need: raw_irrigation.max(MIN_IRRIGATION_NEED),
        })
    }
}

/// One stage of the crop timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub stage: String,
    pub duration_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Irrigation need formatted as `"12.34 lphw"`
    pub irrigation_need: String,
}

/// Irrigation for one (possibly partial) week of a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationWeekEntry {
    pub stage: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub irrigation_amount: f64,
}

impl IrrigationWeekEntry {
    /// Number of days covered by this window
    pub fn days(&self) -> i64 {
        (self.week_end - self.week_start).num_days()
    }
}

/// Timeline and irrigation schedule for one sowing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSchedule {
    pub sow_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub total_duration_days: u32,
    pub timeline: Vec<TimelineEntry>,
    pub irrigation_schedule: Vec<IrrigationWeekEntry>,
}

/// Full prediction response for a crop cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropCycleResult {
    pub prediction_id: Uuid,
    pub crop: String,
    pub sow_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub total_duration_days: u32,
    pub timeline: Vec<TimelineEntry>,
    pub irrigation_schedule: Vec<IrrigationWeekEntry>,
    pub weather: WeatherReading,
    pub soil: SoilReading,
}
