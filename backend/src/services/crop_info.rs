//! Reference agronomic plan served by the crop info endpoints

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{
    ApplicationMethod, CropCoefficient, CropInfo, FertilizerApplication, FertilizerTotals,
    GrowthStageInfo, IrrigationEvent, Nutrient, WaterBalanceSummary,
};

const DEFICIT_IRRIGATION_NOTE: &str = "Automatic irrigation based on soil water deficit";

/// Builds the reference crop plan.
///
/// The plan does not yet depend on the requested crop or planting date.
pub struct CropInfoService;

impl CropInfoService {
    pub fn demo() -> CropInfo {
        CropInfo {
            growth_stages: vec![
                stage("Initial Stage", 15, CropCoefficient::Value(Decimal::new(4, 1))),
                stage(
                    "Development Stage",
                    25,
                    CropCoefficient::Range("0.4-1.15".to_string()),
                ),
                stage("Mid-season Stage", 40, CropCoefficient::Value(Decimal::new(115, 2))),
                stage("Late-season Stage", 30, CropCoefficient::Value(Decimal::new(4, 1))),
            ],
            irrigation_schedule: vec![
                irrigation(ymd(2025, 12, 13), Decimal::new(250, 1)),
                irrigation(ymd(2025, 12, 18), Decimal::new(250, 1)),
            ],
            irrigation_total_mm: Decimal::new(4000, 1),
            fertilizer_schedule: vec![
                fertilizer(ymd(2025, 11, 15), Nutrient::N, 60, ApplicationMethod::Basal),
                fertilizer(ymd(2025, 11, 15), Nutrient::P, 60, ApplicationMethod::Basal),
                fertilizer(ymd(2025, 12, 5), Nutrient::N, 40, ApplicationMethod::TopDress),
            ],
            fertilizer_totals: FertilizerTotals {
                nitrogen: 140,
                phosphorus: 60,
                potassium: 40,
            },
            water_balance_summary: WaterBalanceSummary {
                total_precipitation_mm: Decimal::new(1940, 1),
                total_irrigation_mm: Decimal::new(4000, 1),
                total_et_mm: Decimal::new(6082, 1),
            },
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn stage(name: &str, duration_days: u32, kc: CropCoefficient) -> GrowthStageInfo {
    GrowthStageInfo {
        stage: name.to_string(),
        duration_days,
        kc,
    }
}

fn irrigation(date: NaiveDate, amount_mm: Decimal) -> IrrigationEvent {
    IrrigationEvent {
        date,
        amount_mm,
        note: DEFICIT_IRRIGATION_NOTE.to_string(),
    }
}

fn fertilizer(
    date: NaiveDate,
    nutrient: Nutrient,
    amount_kg_per_ha: u32,
    application: ApplicationMethod,
) -> FertilizerApplication {
    FertilizerApplication {
        date,
        nutrient,
        amount_kg_per_ha,
        application,
    }
}
