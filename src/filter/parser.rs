//! # Query Parameter Parsing
//!
//! Typed readers for the raw `?key=value` pairs of a listing request.
//! Malformed values are rejected instead of silently matching nothing.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Result type for criteria parsing
pub type FilterResult<T> = Result<T, FilterError>;

/// Malformed listing criteria
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Parámetro '{name}' inválido: se esperaba un número, se recibió '{value}'")]
    NotANumber { name: &'static str, value: String },

    #[error("Parámetro '{name}' inválido: se esperaba una fecha ISO-8601, se recibió '{value}'")]
    NotADate { name: &'static str, value: String },

    #[error("Parámetro '{name}' inválido: valores permitidos {allowed}, se recibió '{value}'")]
    NotAllowed {
        name: &'static str,
        allowed: &'static str,
        value: String,
    },
}

/// First non-blank value among `names` (aliases are checked in order)
pub fn param<'a>(params: &'a HashMap<String, String>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| params.get(*name))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

/// Finite decimal number
pub fn parse_number(name: &'static str, value: &str) -> FilterResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FilterError::NotANumber {
            name,
            value: value.to_string(),
        })
}

/// Non-negative whole count
pub fn parse_count(name: &'static str, value: &str) -> FilterResult<u32> {
    value.parse::<u32>().map_err(|_| FilterError::NotANumber {
        name,
        value: value.to_string(),
    })
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as midnight UTC
pub fn parse_timestamp(name: &'static str, value: &str) -> FilterResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FilterError::NotADate {
            name,
            value: value.to_string(),
        })
}
