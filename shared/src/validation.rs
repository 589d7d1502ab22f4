//! Validation utilities for user input and model output

use crate::models::ForecastRecord;

/// Longest message accepted from the chat box, in characters
pub const MAX_INPUT_CHARS: usize = 2000;

// ============================================================================
// User Input
// ============================================================================

/// Validate a chat message, returning it trimmed
pub fn validate_user_input(text: &str) -> Result<&str, &'static str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("Message cannot be empty");
    }
    if trimmed.chars().count() > MAX_INPUT_CHARS {
        return Err("Message is too long");
    }
    Ok(trimmed)
}

// ============================================================================
// Forecast Output
// ============================================================================

/// Reject forecasts with physically meaningless values
pub fn validate_forecast_values(forecast: &ForecastRecord) -> Result<(), &'static str> {
    if !forecast.recharge_mcm.is_finite() || forecast.recharge_mcm < 0.0 {
        return Err("Recharge cannot be negative");
    }
    if !forecast.water_level_m.is_finite() || forecast.water_level_m < 0.0 {
        return Err("Water table depth cannot be negative");
    }
    if !forecast.rainfall_mm.is_finite() || forecast.rainfall_mm < 0.0 {
        return Err("Rainfall cannot be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;

    #[test]
    fn test_user_input_is_trimmed() {
        assert_eq!(validate_user_input("  forecast Chennai \n"), Ok("forecast Chennai"));
    }

    #[test]
    fn test_blank_input_rejected() {
        assert!(validate_user_input("").is_err());
        assert!(validate_user_input(" \t\n ").is_err());
    }

    #[test]
    fn test_overlong_input_rejected() {
        let long = "a".repeat(MAX_INPUT_CHARS + 1);
        assert!(validate_user_input(&long).is_err());
        let max = "அ".repeat(MAX_INPUT_CHARS);
        assert!(validate_user_input(&max).is_ok());
    }

    #[test]
    fn test_forecast_values() {
        let mut forecast = ForecastRecord {
            district: "Ariyalur".to_string(),
            year: 2026,
            recharge_mcm: 380.0,
            water_level_m: 6.1,
            rainfall_mm: 1020.0,
            confidence: Confidence::High,
            rationale: "steady".to_string(),
        };
        assert!(validate_forecast_values(&forecast).is_ok());

        forecast.rainfall_mm = -1.0;
        assert!(validate_forecast_values(&forecast).is_err());
    }
}
