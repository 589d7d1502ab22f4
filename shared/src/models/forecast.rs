//! One-year-ahead forecast models and reply parsing

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::validate_forecast_values;

/// Forecast for the year after the last historical year of a district
///
/// Only the fields the model is asked to forecast are carried; region, soil
/// type, extractable volume and status stay historical-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastRecord {
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Recharge_MCM")]
    pub recharge_mcm: f64,
    #[serde(rename = "WaterLevel_m")]
    pub water_level_m: f64,
    #[serde(rename = "Rainfall_mm")]
    pub rainfall_mm: f64,
    pub confidence: Confidence,
    pub rationale: String,
}

/// Model-reported confidence in a forecast
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Confidence {
    #[serde(alias = "high", alias = "HIGH")]
    High,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "low", alias = "LOW")]
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::Low => write!(f, "Low"),
        }
    }
}

/// The five fields the model returns. District and year are never read
/// from the reply.
#[derive(Debug, Deserialize)]
struct ForecastReply {
    #[serde(rename = "Recharge_MCM")]
    recharge_mcm: f64,
    #[serde(rename = "WaterLevel_m")]
    water_level_m: f64,
    #[serde(rename = "Rainfall_mm")]
    rainfall_mm: f64,
    confidence: Confidence,
    rationale: String,
}

/// Reasons a forecast reply cannot be turned into a [`ForecastRecord`]
#[derive(Debug, Error)]
pub enum ForecastParseError {
    #[error("forecast reply is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("forecast reply is not a JSON object")]
    NotAnObject,

    #[error("model reported an error: {0}")]
    Remote(String),

    #[error("forecast reply is missing or mistyped fields: {0}")]
    MissingFields(#[source] serde_json::Error),

    #[error("forecast values are implausible: {0}")]
    Implausible(&'static str),
}

/// Parse a strict-JSON forecast reply and merge in the caller's district
/// and forecast year.
///
/// A leading/trailing markdown code fence is tolerated. An object carrying
/// an `error` key is treated as an explicit failure from the remote side.
pub fn parse_forecast_reply(
    raw: &str,
    district: &str,
    year: i32,
) -> Result<ForecastRecord, ForecastParseError> {
    let body = strip_code_fence(raw);
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(ForecastParseError::InvalidJson)?;

    let object = value.as_object().ok_or(ForecastParseError::NotAnObject)?;
    if let Some(error) = object.get("error") {
        let message = match error {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(ForecastParseError::Remote(message));
    }

    let reply: ForecastReply =
        serde_json::from_value(value).map_err(ForecastParseError::MissingFields)?;

    let record = ForecastRecord {
        district: district.to_string(),
        year,
        recharge_mcm: reply.recharge_mcm,
        water_level_m: reply.water_level_m,
        rainfall_mm: reply.rainfall_mm,
        confidence: reply.confidence,
        rationale: reply.rationale,
    };

    // Goes beyond the reply contract, which copies the four values as-is:
    // negative or non-finite measurements are refused here.
    validate_forecast_values(&record).map_err(ForecastParseError::Implausible)?;
    Ok(record)
}

/// Remove a surrounding ```json ... ``` fence if present.
///
/// The fence may share a line with the JSON; only a bare info string
/// directly after the opening backticks is dropped.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    let info_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    rest[info_len..].trim()
}
