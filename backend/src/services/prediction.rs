//! Crop cycle prediction: environment → features → per-stage models → schedule

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::{
    build_crop_schedule, CropCycleResult, FeatureInput, FeatureVector, StagePrediction,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::{EnvironmentSource, ModelStore};

/// Runs the per-stage models for one request
pub struct PredictionService<'a> {
    store: &'a ModelStore,
    environment: &'a dyn EnvironmentSource,
}

impl<'a> PredictionService<'a> {
    pub fn new(store: &'a ModelStore, environment: &'a dyn EnvironmentSource) -> Self {
        Self { store, environment }
    }

    /// Predict duration and irrigation need for every stage, in stage order
    pub fn predict_stages(&self, features: &FeatureVector) -> AppResult<Vec<StagePrediction>> {
        self.store
            .stages()
            .iter()
            .map(|stage| {
                let duration_model = self.store.duration_model(stage).ok_or_else(|| {
                    AppError::Inference(format!("No duration model for stage '{}'", stage))
                })?;
                let irrigation_model = self.store.irrigation_model(stage).ok_or_else(|| {
                    AppError::Inference(format!("No irrigation model for stage '{}'", stage))
                })?;

                let raw_duration = duration_model.predict(features);
                let raw_irrigation = irrigation_model.predict(features);
                tracing::debug!(stage = %stage, raw_duration, raw_irrigation, "Stage prediction");

                StagePrediction::from_raw(stage.as_str(), raw_duration, raw_irrigation).ok_or_else(
                    || {
                        AppError::Inference(format!(
                            "Non-finite prediction for stage '{}': duration={}, irrigation={}",
                            stage, raw_duration, raw_irrigation
                        ))
                    },
                )
            })
            .collect()
    }

    /// Predict the full crop cycle for a crop sown on `sow_date`
    pub fn predict_crop_cycle(
        &self,
        crop_type: &str,
        sow_date: NaiveDate,
    ) -> AppResult<CropCycleResult> {
        let prediction_id = Uuid::new_v4();
        tracing::info!(%prediction_id, crop_type, %sow_date, "Predicting crop cycle");

        let weather = self.environment.weather(sow_date);
        let soil = self.environment.soil();

        let features = self.store.schema().build(&FeatureInput {
            crop_type,
            sow_date,
            weather: &weather,
            soil: &soil,
        })?;

        let predictions = self.predict_stages(&features)?;

        let durations: HashMap<String, u32> = predictions
            .iter()
            .map(|p| (p.stage.clone(), p.duration_days))
            .collect();
        let irrigation_needs: HashMap<String, f64> = predictions
            .iter()
            .map(|p| (p.stage.clone(), p.irrigation_need))
            .collect();

        let schedule =
            build_crop_schedule(self.store.stages(), &durations, &irrigation_needs, sow_date)?;

        tracing::info!(
            %prediction_id,
            harvest_date = %schedule.harvest_date,
            total_duration_days = schedule.total_duration_days,
            "Crop cycle predicted"
        );

        Ok(CropCycleResult {
            prediction_id,
            crop: crop_type.to_string(),
            sow_date: schedule.sow_date,
            harvest_date: schedule.harvest_date,
            total_duration_days: schedule.total_duration_days,
            timeline: schedule.timeline,
            irrigation_schedule: schedule.irrigation_schedule,
            weather,
            soil,
        })
    }
}
