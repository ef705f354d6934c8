//! Feature schema and feature vector construction for the regression models
//!
//! The trained models expect a single row whose columns follow the order they
//! were trained with. [`FeatureSchema`] parses that column list once, and a
//! [`FeatureVector`] can only be produced through the schema, so every row is
//! aligned to the model's column order by construction.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::models::{SoilReading, WeatherReading};

/// Prefix of the one-hot crop indicator columns (`Crop_Wheat`, `Crop_Rice`, ...)
pub const CROP_COLUMN_PREFIX: &str = "Crop_";

/// Errors raised while building a schema or a feature row
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("Unknown crop type '{crop}'")]
    UnknownCrop {
        crop: String,
        available: Vec<String>,
    },

    #[error("Duplicate feature column: {0}")]
    DuplicateColumn(String),

    #[error("Unknown feature column: {0}")]
    UnknownColumn(String),

    #[error("Feature column list is empty")]
    EmptySchema,
}

/// A named model input column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    Year,
    SowMonth,
    TemperatureC,
    RainfallMm,
    HumidityPct,
    SoilMoisturePct,
    /// One-hot crop indicator, holding the crop identifier without prefix
    Crop(String),
    /// Any column this service does not set; always 0
    Other(String),
}

impl FeatureColumn {
    /// Parse a trained column name
    pub fn parse(name: &str) -> Self {
        match name {
            "Year" => FeatureColumn::Year,
            "Sow_Month" => FeatureColumn::SowMonth,
            "Temp_C" => FeatureColumn::TemperatureC,
            "Rainfall_mm" => FeatureColumn::RainfallMm,
            "Humidity_%" => FeatureColumn::HumidityPct,
            "SoilMoist_%" => FeatureColumn::SoilMoisturePct,
            other => match other.strip_prefix(CROP_COLUMN_PREFIX) {
                Some(crop) if !crop.is_empty() => FeatureColumn::Crop(crop.to_string()),
                _ => FeatureColumn::Other(other.to_string()),
            },
        }
    }

    /// Column name as used by the trained models
    pub fn name(&self) -> String {
        match self {
            FeatureColumn::Year => "Year".to_string(),
            FeatureColumn::SowMonth => "Sow_Month".to_string(),
            FeatureColumn::TemperatureC => "Temp_C".to_string(),
            FeatureColumn::RainfallMm => "Rainfall_mm".to_string(),
            FeatureColumn::HumidityPct => "Humidity_%".to_string(),
            FeatureColumn::SoilMoisturePct => "SoilMoist_%".to_string(),
            FeatureColumn::Crop(crop) => format!("{}{}", CROP_COLUMN_PREFIX, crop),
            FeatureColumn::Other(name) => name.clone(),
        }
    }
}

impl fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Inputs for a single feature row
#[derive(Debug, Clone, Copy)]
pub struct FeatureInput<'a> {
    pub crop_type: &'a str,
    pub sow_date: NaiveDate,
    pub weather: &'a WeatherReading,
    pub soil: &'a SoilReading,
}

/// Ordered set of columns a model was trained on
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<FeatureColumn>,
    positions: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Parse an ordered list of column names
    pub fn new<I, S>(names: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns = Vec::new();
        let mut positions = HashMap::new();

        for (idx, name) in names.into_iter().enumerate() {
            let name = name.as_ref();
            if positions.insert(name.to_string(), idx).is_some() {
                return Err(FeatureError::DuplicateColumn(name.to_string()));
            }
            columns.push(FeatureColumn::parse(name));
        }

        if columns.is_empty() {
            return Err(FeatureError::EmptySchema);
        }

        Ok(Self { columns, positions })
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by its trained name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Crop identifiers known to the models, in column order
    pub fn crop_ids(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter_map(|c| match c {
                FeatureColumn::Crop(crop) => Some(crop.clone()),
                _ => None,
            })
            .collect()
    }

    /// Build the feature row for one prediction request.
    ///
    /// Fails with [`FeatureError::UnknownCrop`] when the schema has no
    /// indicator column for the requested crop.
    pub fn build(&self, input: &FeatureInput<'_>) -> Result<FeatureVector, FeatureError> {
        let crop_column = format!("{}{}", CROP_COLUMN_PREFIX, input.crop_type);
        if self.position(&crop_column).is_none() {
            return Err(FeatureError::UnknownCrop {
                crop: input.crop_type.to_string(),
                available: self.crop_ids(),
            });
        }

        let values = self
            .columns
            .iter()
            .map(|column| match column {
                FeatureColumn::Year => f64::from(input.sow_date.year()),
                FeatureColumn::SowMonth => f64::from(input.sow_date.month()),
                FeatureColumn::TemperatureC => input.weather.temperature_c,
                FeatureColumn::RainfallMm => input.weather.rainfall_mm,
                FeatureColumn::HumidityPct => input.weather.humidity_percent,
                FeatureColumn::SoilMoisturePct => input.soil.moisture_percent,
                FeatureColumn::Crop(crop) if crop == input.crop_type => 1.0,
                FeatureColumn::Crop(_) | FeatureColumn::Other(_) => 0.0,
            })
            .collect();

        Ok(FeatureVector { values })
    }
}

/// A model input row in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column
    pub fn get(&self, schema: &FeatureSchema, name: &str) -> Option<f64> {
        schema
            .position(name)
            .and_then(|idx| self.values.get(idx).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> WeatherReading {
        WeatherReading {
            temperature_c: 22.5,
            rainfall_mm: 12.0,
            humidity_percent: 60.0,
        }
    }

    fn soil() -> SoilReading {
        SoilReading {
            moisture_percent: 25.0,
            nitrogen: 40.0,
            phosphorus: 20.0,
            potassium: 30.0,
            ph: 6.5,
        }
    }

    fn schema() -> FeatureSchema {
        FeatureSchema::new([
            "Crop_Rice",
            "Temp_C",
            "Year",
            "Crop_Wheat",
            "Humidity_%",
            "Sow_Month",
            "Rainfall_mm",
            "SoilMoist_%",
            "Elevation_m",
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_known_columns() {
        assert_eq!(FeatureColumn::parse("Year"), FeatureColumn::Year);
        assert_eq!(FeatureColumn::parse("Humidity_%"), FeatureColumn::HumidityPct);
        assert_eq!(
            FeatureColumn::parse("Crop_Maize"),
            FeatureColumn::Crop("Maize".to_string())
        );
        assert_eq!(
            FeatureColumn::parse("Crop_"),
            FeatureColumn::Other("Crop_".to_string())
        );
    }

    #[test]
    fn test_column_name_round_trips() {
        for name in ["Year", "Sow_Month", "Temp_C", "Rainfall_mm", "Humidity_%", "SoilMoist_%", "Crop_Rice", "pH"] {
            assert_eq!(FeatureColumn::parse(name).name(), name);
        }
    }

    #[test]
    fn test_build_follows_schema_order() {
        let schema = schema();
        let (w, s) = (weather(), soil());
        let row = schema
            .build(&FeatureInput {
                crop_type: "Wheat",
                sow_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
                weather: &w,
                soil: &s,
            })
            .unwrap();

        assert_eq!(
            row.values(),
            &[0.0, 22.5, 2025.0, 1.0, 60.0, 3.0, 12.0, 25.0, 0.0]
        );
        assert_eq!(row.get(&schema, "Crop_Wheat"), Some(1.0));
        assert_eq!(row.get(&schema, "Elevation_m"), Some(0.0));
        assert_eq!(row.get(&schema, "Missing"), None);
    }

    #[test]
    fn test_unknown_crop_lists_available() {
        let schema = schema();
        let (w, s) = (weather(), soil());
        let err = schema
            .build(&FeatureInput {
                crop_type: "Barley",
                sow_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                weather: &w,
                soil: &s,
            })
            .unwrap_err();

        assert_eq!(
            err,
            FeatureError::UnknownCrop {
                crop: "Barley".to_string(),
                available: vec!["Rice".to_string(), "Wheat".to_string()],
            }
        );
    }

    #[test]
    fn test_crop_match_is_case_sensitive() {
        let schema = schema();
        let (w, s) = (weather(), soil());
        let result = schema.build(&FeatureInput {
            crop_type: "wheat",
            sow_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            weather: &w,
            soil: &s,
        });
        assert!(matches!(result, Err(FeatureError::UnknownCrop { .. })));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = FeatureSchema::new(["Year", "Temp_C", "Year"]).unwrap_err();
        assert_eq!(err, FeatureError::DuplicateColumn("Year".to_string()));
    }

    #[test]
    fn test_empty_schema_rejected() {
        let names: Vec<String> = Vec::new();
        assert_eq!(FeatureSchema::new(names).unwrap_err(), FeatureError::EmptySchema);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            /// Exactly the requested crop's indicator is set
            #[test]
            fn prop_one_hot_crop_indicator(
                crop_idx in 0usize..2,
                day_offset in 0u64..20_000u64,
                temperature in -10.0f64..50.0f64
            ) {
                let schema = schema();
                let crop = ["Rice", "Wheat"][crop_idx];
                let sow_date = NaiveDate::from_ymd_opt(2000, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(day_offset))
                    .unwrap();
                let w = WeatherReading { temperature_c: temperature, ..weather() };
                let s = soil();

                let row = schema
                    .build(&FeatureInput { crop_type: crop, sow_date, weather: &w, soil: &s })
                    .unwrap();

                prop_assert_eq!(row.len(), schema.len());
                let indicator_sum: f64 = schema
                    .crop_ids()
                    .iter()
                    .filter_map(|id| row.get(&schema, &format!("{}{}", CROP_COLUMN_PREFIX, id)))
                    .sum();
                prop_assert_eq!(indicator_sum, 1.0);
                prop_assert_eq!(row.get(&schema, &format!("Crop_{}", crop)), Some(1.0));
                prop_assert_eq!(row.get(&schema, "Temp_C"), Some(temperature));
                prop_assert_eq!(row.get(&schema, "Sow_Month"), Some(f64::from(sow_date.month())));
            }
        }
    }
}
