//! Weather and soil models

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Weather conditions used as model input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub humidity_percent: f64,
}

/// Soil conditions used as model input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilReading {
    pub moisture_percent: f64,
    /// Nitrogen (kg/ha)
    pub nitrogen: f64,
    /// Phosphorus (kg/ha)
    pub phosphorus: f64,
    /// Potassium (kg/ha)
    pub potassium: f64,
    pub ph: f64,
}

/// Season bucket derived from the calendar month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// December to February
    Winter,
    /// March to May
    Summer,
    /// June to September
    Monsoon,
    /// October and November
    PostMonsoon,
}

impl Season {
    /// Season for a calendar month (1-12)
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Summer,
            6..=9 => Season::Monsoon,
            10 | 11 => Season::PostMonsoon,
            _ => Season::Winter,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Winter => write!(f, "Winter"),
            Season::Summer => write!(f, "Summer"),
            Season::Monsoon => write!(f, "Monsoon"),
            Season::PostMonsoon => write!(f, "Post-monsoon"),
        }
    }
}
