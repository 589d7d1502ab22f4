//! Historical groundwater assessment models

use serde::{Deserialize, Serialize};

/// One row of the historical dataset, keyed by (district, year)
///
/// Field names on the wire follow the published assessment schema so the
/// same JSON can be embedded into model prompts and handed to the chart
/// renderer unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalRecord {
    #[serde(rename = "State")]
    pub region: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "Year")]
    pub year: i32,
    /// Annual recharge in million cubic metres
    #[serde(rename = "Recharge_MCM")]
    pub recharge_mcm: f64,
    /// Depth to the water table in metres below ground
    #[serde(rename = "WaterLevel_m")]
    pub water_level_m: f64,
    #[serde(rename = "Rainfall_mm")]
    pub rainfall_mm: f64,
    #[serde(rename = "Soil_type")]
    pub soil_type: String,
    /// Annual extractable groundwater in hectare metres
    #[serde(rename = "Annual_Extractable_GW_HAM")]
    pub extractable_gw_ham: f64,
    #[serde(rename = "Status")]
    pub status: GroundwaterStatus,
}

impl HistoricalRecord {
    /// Case-insensitive exact match on the district name
    pub fn is_district(&self, district: &str) -> bool {
        self.district.to_lowercase() == district.to_lowercase()
    }
}

/// Stage-of-extraction classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GroundwaterStatus {
    Safe,
    #[serde(rename = "Semi-Critical")]
    SemiCritical,
    Critical,
}

impl std::fmt::Display for GroundwaterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroundwaterStatus::Safe => write!(f, "Safe"),
            GroundwaterStatus::SemiCritical => write!(f, "Semi-Critical"),
            GroundwaterStatus::Critical => write!(f, "Critical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_hyphenated_wire_name() {
        let json = serde_json::to_string(&GroundwaterStatus::SemiCritical).unwrap();
        assert_eq!(json, "\"Semi-Critical\"");

        let parsed: GroundwaterStatus = serde_json::from_str("\"Critical\"").unwrap();
        assert_eq!(parsed, GroundwaterStatus::Critical);
    }

    #[test]
    fn record_round_trips_with_dataset_field_names() {
        let json = r#"{
            "State": "Tamil Nadu",
            "District": "Madurai",
            "Year": 2021,
            "Recharge_MCM": 512.4,
            "WaterLevel_m": 11.2,
            "Rainfall_mm": 905.0,
            "Soil_type": "Black Cotton",
            "Annual_Extractable_GW_HAM": 46116.0,
            "Status": "Semi-Critical"
        }"#;

        let record: HistoricalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.district, "Madurai");
        assert_eq!(record.year, 2021);
        assert_eq!(record.status, GroundwaterStatus::SemiCritical);
        assert!(record.is_district("MADURAI"));
        assert!(!record.is_district("Madura"));
    }
}
