//! Crop timeline and weekly irrigation scheduling
//!
//! Stages run back to back starting on the sowing date. Each stage's
//! predicted irrigation intensity is spread over its calendar weeks: a full
//! 7-day window receives the whole intensity, a shorter final window receives
//! `intensity * days / 7`.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::models::{
    CropSchedule, IrrigationWeekEntry, StagePrediction, TimelineEntry, IRRIGATION_UNIT,
};

/// Length of an irrigation bucket in days
pub const DAYS_PER_WEEK: u32 = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("No predicted duration for stage '{0}'")]
    MissingDuration(String),

    #[error("No predicted irrigation need for stage '{0}'")]
    MissingIrrigation(String),

    #[error("Stage '{0}' ends outside the supported date range")]
    DateOutOfRange(String),
}

/// Build the schedule from an ordered stage list and per-stage predictions.
///
/// `stages` fixes the order; `durations` and `irrigation_needs` must hold an
/// entry for every listed stage.
pub fn build_crop_schedule(
    stages: &[String],
    durations: &HashMap<String, u32>,
    irrigation_needs: &HashMap<String, f64>,
    sow_date: NaiveDate,
) -> Result<CropSchedule, ScheduleError> {
    let predictions = stages
        .iter()
        .map(|stage| {
            let duration_days = *durations
                .get(stage)
                .ok_or_else(|| ScheduleError::MissingDuration(stage.clone()))?;
            let irrigation_need = *irrigation_needs
                .get(stage)
                .ok_or_else(|| ScheduleError::MissingIrrigation(stage.clone()))?;
            Ok(StagePrediction {
                stage: stage.clone(),
                duration_days,
                irrigation_need,
            })
        })
        .collect::<Result<Vec<_>, ScheduleError>>()?;

    schedule_stages(&predictions, sow_date)
}

/// Build the schedule from predictions already in stage order
pub fn schedule_stages(
    predictions: &[StagePrediction],
    sow_date: NaiveDate,
) -> Result<CropSchedule, ScheduleError> {
    let timeline = build_timeline(predictions, sow_date)?;
    let irrigation_schedule = build_irrigation_weeks(predictions, sow_date)?;

    let total_duration_days: u32 = predictions.iter().map(|p| p.duration_days).sum();
    let harvest_date = timeline.last().map(|e| e.end_date).unwrap_or(sow_date);

    Ok(CropSchedule {
        sow_date,
        harvest_date,
        total_duration_days,
        timeline,
        irrigation_schedule,
    })
}

/// Format an irrigation need for display, e.g. `"12.34 lphw"`
pub fn format_irrigation_need(need: f64) -> String {
    format!("{:.2} {}", need, IRRIGATION_UNIT)
}

fn add_days(date: NaiveDate, days: u32, stage: &str) -> Result<NaiveDate, ScheduleError> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| ScheduleError::DateOutOfRange(stage.to_string()))
}

fn build_timeline(
    predictions: &[StagePrediction],
    sow_date: NaiveDate,
) -> Result<Vec<TimelineEntry>, ScheduleError> {
    let mut current = sow_date;
    let mut timeline = Vec::with_capacity(predictions.len());

    for prediction in predictions {
        let end_date = add_days(current, prediction.duration_days, &prediction.stage)?;
        timeline.push(TimelineEntry {
            stage: prediction.stage.clone(),
            duration_days: prediction.duration_days,
            start_date: current,
            end_date,
            irrigation_need: format_irrigation_need(prediction.irrigation_need),
        });
        current = end_date;
    }

    Ok(timeline)
}

fn build_irrigation_weeks(
    predictions: &[StagePrediction],
    sow_date: NaiveDate,
) -> Result<Vec<IrrigationWeekEntry>, ScheduleError> {
    let mut current = sow_date;
    let mut weeks = Vec::new();

    for prediction in predictions {
        let stage_end = add_days(current, prediction.duration_days, &prediction.stage)?;
        let mut week_start = current;

        while week_start < stage_end {
            let remaining = (stage_end - week_start).num_days();
            let span = remaining.min(i64::from(DAYS_PER_WEEK));
            // span is in 1..=7 here
            let week_end = add_days(week_start, span as u32, &prediction.stage)?;

            weeks.push(IrrigationWeekEntry {
                stage: prediction.stage.clone(),
                week_start,
                week_end,
                irrigation_amount: prediction.irrigation_need * (span as f64
                    / f64::from(DAYS_PER_WEEK)),
            });
            week_start = week_end;
        }

        current = stage_end;
    }

    Ok(weeks)
}
