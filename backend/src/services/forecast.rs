//! Forecast requester
//!
//! Issues a standalone model call, outside the conversational session,
//! asking for a strict-JSON one-year-ahead forecast for one district.

use std::sync::Arc;

use shared::{parse_forecast_reply, Dataset, ForecastParseError, ForecastRecord, HistoricalRecord, LanguageOption};
use thiserror::Error;

use crate::error::AppError;
use crate::external::{GenerateRequest, LlmClient};

/// Why a forecast could not be produced
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("no historical data for district '{0}'")]
    UnknownDistrict(String),

    #[error("forecast request failed: {0}")]
    Transport(#[from] AppError),

    #[error(transparent)]
    Parse(#[from] ForecastParseError),
}

/// Requests forecasts from the hosted model
#[derive(Clone)]
pub struct ForecastRequester {
    llm: Arc<dyn LlmClient>,
    dataset: Arc<Dataset>,
}

impl ForecastRequester {
    pub fn new(llm: Arc<dyn LlmClient>, dataset: Arc<Dataset>) -> Self {
        Self { llm, dataset }
    }

    /// Forecast the year after the dataset's final year.
    ///
    /// The returned record's district and year come from the caller and the
    /// dataset, never from the model reply.
    pub async fn request_forecast(
        &self,
        district: &str,
        language: &LanguageOption,
    ) -> Result<ForecastRecord, ForecastError> {
        let history = self.dataset.for_district(district);
        if history.is_empty() {
            return Err(ForecastError::UnknownDistrict(district.to_string()));
        }

        let year = self.dataset.forecast_year();
        let prompt = build_forecast_prompt(district, year, &history, language);

        tracing::info!(district, year, "Requesting forecast");
        let reply = self
            .llm
            .generate(GenerateRequest::prompt(prompt).with_json_response())
            .await?;

        let record = parse_forecast_reply(&reply, district, year)?;
        tracing::debug!(district, confidence = %record.confidence, "Forecast parsed");
        Ok(record)
    }
}

pub fn build_forecast_prompt(
    district: &str,
    year: i32,
    history: &[HistoricalRecord],
    language: &LanguageOption,
) -> String {
    let data = serde_json::to_string_pretty(history).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"
You are a data scientist specializing in hydrological time-series analysis.
(Respond in {language})
Based on the following time-series data for the {district} district, perform a sophisticated forecast to predict the values for the year {year}. Consider the underlying trends, acceleration/deceleration in changes, and historical volatility. Use a method conceptually similar to exponential smoothing to weigh recent years more heavily.

Data: {data}

Provide your prediction as a single, clean JSON object with NO other text or markdown. The JSON object must have these exact keys: "Recharge_MCM" (number), "WaterLevel_m" (number), "Rainfall_mm" (number), "confidence" (string, one of "High", "Medium", or "Low"), and "rationale" (string, a brief one-sentence explanation for your confidence level).
"#,
        language = language.name,
        district = district,
        year = year,
        data = data,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_only_requested_district() {
        let dataset = Dataset::embedded();
        let history = dataset.for_district("Madurai");
        let prompt = build_forecast_prompt("Madurai", 2026, &history, LanguageOption::from_code("ta-IN"));

        assert!(prompt.contains("(Respond in Tamil)"));
        assert!(prompt.contains("for the year 2026"));
        assert!(prompt.contains("\"District\": \"Madurai\""));
        assert!(!prompt.contains("\"District\": \"Chennai\""));
        assert!(prompt.contains("\"Recharge_MCM\" (number)"));
    }
}
