//! Validation utilities for planning requests

use chrono::NaiveDate;
use validator::ValidationErrors;

/// Date format accepted for sowing and planting dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| "Date must be in YYYY-MM-DD format")
}

/// Names of the fields that failed validation, sorted
pub fn invalid_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields
}

/// Human readable message for missing request fields, e.g.
/// `"Please provide crop_type and planting_date"`
pub fn missing_fields_message(fields: &[String]) -> String {
    match fields {
        [] => "Invalid request".to_string(),
        [only] => format!("Please provide {}", only),
        [init @ .., last] => format!("Please provide {} and {}", init.join(", "), last),
    }
}
