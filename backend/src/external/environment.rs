//! Synthetic weather and soil inputs
//!
//! Stands in for sensor and forecast ingestion. Weather is drawn from ranges
//! that depend on the sowing season; soil is drawn from fixed ranges.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use rand::Rng;
use shared::{Season, SoilReading, WeatherReading};

/// Source of the weather and soil conditions fed to the models
pub trait EnvironmentSource: Send + Sync {
    fn weather(&self, sow_date: NaiveDate) -> WeatherReading;
    fn soil(&self) -> SoilReading;
}

/// Value ranges for one season
#[derive(Debug, Clone)]
pub struct WeatherRanges {
    pub temperature_c: RangeInclusive<f64>,
    pub rainfall_mm: RangeInclusive<f64>,
    pub humidity_percent: RangeInclusive<f64>,
}

/// Value ranges for soil readings
#[derive(Debug, Clone)]
pub struct SoilRanges {
    pub moisture_percent: RangeInclusive<f64>,
    pub nitrogen: RangeInclusive<f64>,
    pub phosphorus: RangeInclusive<f64>,
    pub potassium: RangeInclusive<f64>,
    pub ph: RangeInclusive<f64>,
}

pub fn weather_ranges(season: Season) -> WeatherRanges {
    match season {
        Season::Winter => WeatherRanges {
            temperature_c: 10.0..=25.0,
            rainfall_mm: 0.0..=30.0,
            humidity_percent: 40.0..=70.0,
        },
        Season::Summer => WeatherRanges {
            temperature_c: 25.0..=40.0,
            rainfall_mm: 0.0..=20.0,
            humidity_percent: 20.0..=50.0,
        },
        Season::Monsoon => WeatherRanges {
            temperature_c: 24.0..=34.0,
            rainfall_mm: 100.0..=300.0,
            humidity_percent: 70.0..=95.0,
        },
        Season::PostMonsoon => WeatherRanges {
            temperature_c: 18.0..=30.0,
            rainfall_mm: 10.0..=80.0,
            humidity_percent: 50.0..=80.0,
        },
    }
}

pub fn soil_ranges() -> SoilRanges {
    SoilRanges {
        moisture_percent: 10.0..=40.0,
        nitrogen: 20.0..=80.0,
        phosphorus: 10.0..=50.0,
        potassium: 10.0..=60.0,
        ph: 5.5..=8.0,
    }
}

/// Random environment drawn from the thread-local RNG on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticEnvironment;

impl SyntheticEnvironment {
    pub fn new() -> Self {
        Self
    }
}

fn sample(rng: &mut impl Rng, range: &RangeInclusive<f64>) -> f64 {
    let value = rng.random_range(range.clone());
    (value * 100.0).round() / 100.0
}

impl EnvironmentSource for SyntheticEnvironment {
    fn weather(&self, sow_date: NaiveDate) -> WeatherReading {
        let ranges = weather_ranges(Season::for_date(sow_date));
        let mut rng = rand::rng();

        WeatherReading {
            temperature_c: sample(&mut rng, &ranges.temperature_c),
            rainfall_mm: sample(&mut rng, &ranges.rainfall_mm),
            humidity_percent: sample(&mut rng, &ranges.humidity_percent),
        }
    }

    fn soil(&self) -> SoilReading {
        let ranges = soil_ranges();
        let mut rng = rand::rng();

        SoilReading {
            moisture_percent: sample(&mut rng, &ranges.moisture_percent),
            nitrogen: sample(&mut rng, &ranges.nitrogen),
            phosphorus: sample(&mut rng, &ranges.phosphorus),
            potassium: sample(&mut rng, &ranges.potassium),
            ph: sample(&mut rng, &ranges.ph),
        }
    }
}

/// Constant environment, for reproducible predictions
#[derive(Debug, Clone, Copy)]
pub struct FixedEnvironment {
    pub weather: WeatherReading,
    pub soil: SoilReading,
}

impl EnvironmentSource for FixedEnvironment {
    fn weather(&self, _sow_date: NaiveDate) -> WeatherReading {
        self.weather
    }

    fn soil(&self) -> SoilReading {
        self.soil
    }
}
