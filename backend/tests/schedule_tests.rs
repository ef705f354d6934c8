//! Crop schedule tests
//!
//! Properties of the stage timeline and the weekly irrigation schedule:
//! - Stages are contiguous from the sowing date to the harvest date
//! - Irrigation windows tile every stage and last at most 7 days
//! - A stage's irrigation total equals intensity × duration / 7

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::{schedule_stages, Season, StagePrediction, DAYS_PER_WEEK};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn prediction(stage: &str, duration_days: u32, irrigation_need: f64) -> StagePrediction {
    StagePrediction {
        stage: stage.to_string(),
        duration_days,
        irrigation_need,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_four_stage_season() {
        let predictions = vec![
            prediction("Initial", 15, 14.0),
            prediction("Development", 25, 21.0),
            prediction("Mid-season", 40, 35.0),
            prediction("Late-season", 30, 7.0),
        ];
        let schedule = schedule_stages(&predictions, date("2025-11-15")).unwrap();

        assert_eq!(schedule.total_duration_days, 110);
        assert_eq!(schedule.harvest_date, date("2026-03-05"));
        assert_eq!(schedule.irrigation_schedule.len(), 18);

        let last = schedule.irrigation_schedule.last().unwrap();
        assert_eq!(last.stage, "Late-season");
        assert_eq!(last.week_end, schedule.harvest_date);
        // 30 days -> final window of 2 days
        assert!((last.irrigation_amount - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_stage_crossing_leap_day() {
        let predictions = vec![prediction("Initial", 7, 3.5)];
        let schedule = schedule_stages(&predictions, date("2024-02-25")).unwrap();

        assert_eq!(schedule.harvest_date, date("2024-03-03"));
        assert_eq!(schedule.irrigation_schedule.len(), 1);
        assert!((schedule.irrigation_schedule[0].irrigation_amount - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_windows_restart_at_each_stage() {
        // a 3 day stage followed by a 10 day stage: windows 3 | 7 + 3
        let predictions = vec![prediction("Initial", 3, 7.0), prediction("Development", 10, 7.0)];
        let schedule = schedule_stages(&predictions, date("2025-01-01")).unwrap();

        let days: Vec<i64> = schedule.irrigation_schedule.iter().map(|w| w.days()).collect();
        assert_eq!(days, vec![3, 7, 3]);
        assert_eq!(schedule.irrigation_schedule[1].week_start, date("2025-01-04"));
    }

    #[test]
    fn test_season_buckets() {
        assert_eq!(Season::for_date(date("2025-01-10")), Season::Winter);
        assert_eq!(Season::for_date(date("2025-12-31")), Season::Winter);
        assert_eq!(Season::for_date(date("2025-04-01")), Season::Summer);
        assert_eq!(Season::for_date(date("2025-07-15")), Season::Monsoon);
        assert_eq!(Season::for_date(date("2025-10-02")), Season::PostMonsoon);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for sowing dates between 2000 and 2049
    fn sow_date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0u64..18_250u64).prop_map(|offset| {
            date("2000-01-01")
                .checked_add_days(chrono::Days::new(offset))
                .unwrap()
        })
    }

    /// Strategy for a stage list of 1 to 6 stages
    fn predictions_strategy() -> impl Strategy<Value = Vec<StagePrediction>> {
        prop::collection::vec((1u32..=120u32, 0.1f64..100.0f64), 1..=6).prop_map(|stages| {
            stages
                .into_iter()
                .enumerate()
                .map(|(i, (days, need))| prediction(&format!("Stage {}", i + 1), days, need))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Timeline is contiguous and spans exactly the total duration
        #[test]
        fn prop_timeline_contiguous(
            predictions in predictions_strategy(),
            sow_date in sow_date_strategy()
        ) {
            let schedule = schedule_stages(&predictions, sow_date).unwrap();

            prop_assert_eq!(schedule.timeline.len(), predictions.len());
            prop_assert_eq!(schedule.timeline[0].start_date, sow_date);
            for pair in schedule.timeline.windows(2) {
                prop_assert_eq!(pair[0].end_date, pair[1].start_date);
            }
            prop_assert_eq!(schedule.timeline.last().unwrap().end_date, schedule.harvest_date);

            let expected: u32 = predictions.iter().map(|p| p.duration_days).sum();
            prop_assert_eq!(schedule.total_duration_days, expected);
            prop_assert_eq!(
                (schedule.harvest_date - sow_date).num_days(),
                i64::from(expected)
            );
        }

        /// Windows tile each stage without gaps, overlaps or overlong weeks
        #[test]
        fn prop_irrigation_windows_tile_stages(
            predictions in predictions_strategy(),
            sow_date in sow_date_strategy()
        ) {
            let schedule = schedule_stages(&predictions, sow_date).unwrap();

            for entry in &schedule.timeline {
                let windows: Vec<_> = schedule
                    .irrigation_schedule
                    .iter()
                    .filter(|w| w.stage == entry.stage)
                    .collect();

                prop_assert_eq!(windows[0].week_start, entry.start_date);
                prop_assert_eq!(windows.last().unwrap().week_end, entry.end_date);
                for pair in windows.windows(2) {
                    prop_assert_eq!(pair[0].week_end, pair[1].week_start);
                    prop_assert_eq!(pair[0].days(), i64::from(DAYS_PER_WEEK));
                }
                for window in &windows {
                    prop_assert!(window.days() >= 1);
                    prop_assert!(window.days() <= i64::from(DAYS_PER_WEEK));
                }

                let expected_windows = entry.duration_days.div_ceil(DAYS_PER_WEEK) as usize;
                prop_assert_eq!(windows.len(), expected_windows);
            }
        }

        /// Irrigation total per stage equals intensity × duration / 7
        #[test]
        fn prop_irrigation_prorated(
            predictions in predictions_strategy(),
            sow_date in sow_date_strategy()
        ) {
            let schedule = schedule_stages(&predictions, sow_date).unwrap();

            for p in &predictions {
                let total: f64 = schedule
                    .irrigation_schedule
                    .iter()
                    .filter(|w| w.stage == p.stage)
                    .map(|w| w.irrigation_amount)
                    .sum();
                let expected = p.irrigation_need * f64::from(p.duration_days) / 7.0;
                prop_assert!((total - expected).abs() < 1e-6 * expected.max(1.0));
            }
        }

        /// Raw model outputs always clamp to a schedulable prediction
        #[test]
        fn prop_raw_predictions_clamped(
            raw_duration in -1000.0f64..1000.0f64,
            raw_irrigation in -1000.0f64..1000.0f64
        ) {
            let p = StagePrediction::from_raw("Initial", raw_duration, raw_irrigation).unwrap();
            prop_assert!(p.duration_days >= 1);
            prop_assert!(p.irrigation_need >= 0.1);
            if raw_duration >= 1.0 {
                prop_assert_eq!(p.duration_days, raw_duration.floor() as u32);
            }
        }
    }
}
