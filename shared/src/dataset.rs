//! Read-only historical dataset
//!
//! Loaded once at startup and never mutated. Rows are kept grouped by
//! district (first-seen order) and ascending by year inside each group,
//! which the chart renderer relies on.

use thiserror::Error;

use crate::models::{GroundwaterStatus, HistoricalRecord};

use GroundwaterStatus::{Critical, Safe, SemiCritical};

pub const REGION: &str = "Tamil Nadu";

type SeedRow = (i32, f64, f64, f64, f64, GroundwaterStatus);

/// (district, soil type, [(year, recharge MCM, water level m, rainfall mm, extractable HAM, status)])
const SEED: &[(&str, &str, &[SeedRow])] = &[
    (
        "Chennai",
        "Clay Loam",
        &[
            (2020, 245.3, 14.2, 1285.0, 22077.0, Critical),
            (2021, 268.1, 13.6, 1510.0, 24129.0, Critical),
            (2022, 231.7, 14.9, 1198.0, 20853.0, Critical),
            (2023, 252.4, 15.3, 1342.0, 22716.0, Critical),
            (2024, 239.8, 15.8, 1226.0, 21582.0, Critical),
            (2025, 228.6, 16.4, 1154.0, 20574.0, Critical),
        ],
    ),
    (
        "Kanchipuram",
        "Red Loam",
        &[
            (2020, 612.5, 8.7, 1180.0, 55125.0, SemiCritical),
            (2021, 655.2, 8.1, 1390.0, 58968.0, SemiCritical),
            (2022, 598.4, 9.0, 1105.0, 53856.0, SemiCritical),
            (2023, 621.9, 9.2, 1212.0, 55971.0, SemiCritical),
            (2024, 604.3, 9.6, 1150.0, 54387.0, SemiCritical),
            (2025, 589.7, 10.1, 1098.0, 53073.0, SemiCritical),
        ],
    ),
    (
        "Madurai",
        "Black Cotton",
        &[
            (2020, 498.6, 10.8, 865.0, 44874.0, SemiCritical),
            (2021, 532.1, 10.2, 1012.0, 47889.0, SemiCritical),
            (2022, 487.3, 11.5, 842.0, 43857.0, SemiCritical),
            (2023, 471.9, 12.1, 815.0, 42471.0, Critical),
            (2024, 463.2, 12.8, 798.0, 41688.0, Critical),
            (2025, 455.0, 13.4, 776.0, 40950.0, Critical),
        ],
    ),
    (
        "Thiruvallur",
        "Sandy Loam",
        &[
            (2020, 702.4, 7.9, 1150.0, 63216.0, SemiCritical),
            (2021, 748.9, 7.2, 1402.0, 67401.0, SemiCritical),
            (2022, 689.5, 8.3, 1098.0, 62055.0, SemiCritical),
            (2023, 715.0, 8.5, 1230.0, 64350.0, SemiCritical),
            (2024, 694.8, 8.9, 1132.0, 62532.0, SemiCritical),
            (2025, 681.2, 9.3, 1085.0, 61308.0, SemiCritical),
        ],
    ),
    (
        "Ariyalur",
        "Red Sandy",
        &[
            (2020, 385.2, 5.4, 1045.0, 34668.0, Safe),
            (2021, 402.7, 5.1, 1188.0, 36243.0, Safe),
            (2022, 379.9, 5.6, 1002.0, 34191.0, Safe),
            (2023, 391.4, 5.5, 1094.0, 35226.0, Safe),
            (2024, 388.0, 5.8, 1061.0, 34920.0, Safe),
            (2025, 381.6, 6.0, 1030.0, 34344.0, Safe),
        ],
    ),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("dataset has no records")]
    Empty,

    #[error("duplicate record for {district} in {year}")]
    Duplicate { district: String, year: i32 },
}

/// Immutable table of historical records
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<HistoricalRecord>,
    latest_year: i32,
}

impl Dataset {
    /// Build a dataset, grouping rows by district and sorting each group by
    /// year. (district, year) must be unique, compared case-insensitively.
    pub fn new(mut records: Vec<HistoricalRecord>) -> Result<Self, DatasetError> {
        let mut order: Vec<String> = Vec::new();
        for record in &records {
            let key = record.district.to_lowercase();
            if !order.contains(&key) {
                order.push(key);
            }
        }

        records.sort_by_key(|r| {
            let group = order
                .iter()
                .position(|d| *d == r.district.to_lowercase())
                .unwrap_or(usize::MAX);
            (group, r.year)
        });

        for pair in records.windows(2) {
            if pair[0].is_district(&pair[1].district) && pair[0].year == pair[1].year {
                return Err(DatasetError::Duplicate {
                    district: pair[1].district.clone(),
                    year: pair[1].year,
                });
            }
        }

        let latest_year = records
            .iter()
            .map(|r| r.year)
            .max()
            .ok_or(DatasetError::Empty)?;

        Ok(Self {
            records,
            latest_year,
        })
    }

    /// The bundled Tamil Nadu assessment data, 2020-2025
    pub fn embedded() -> Self {
        let records = SEED
            .iter()
            .flat_map(|(district, soil, rows)| {
                rows.iter().map(move |&(year, recharge, level, rain, extractable, status)| {
                    HistoricalRecord {
                        region: REGION.to_string(),
                        district: district.to_string(),
                        year,
                        recharge_mcm: recharge,
                        water_level_m: level,
                        rainfall_mm: rain,
                        soil_type: soil.to_string(),
                        extractable_gw_ham: extractable,
                        status,
                    }
                })
            })
            .collect::<Vec<_>>();

        let latest_year = records.iter().map(|r| r.year).max().unwrap_or_default();
        Self {
            records,
            latest_year,
        }
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    /// Distinct district names in dataset order
    pub fn districts(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.district.as_str()) {
                names.push(&record.district);
            }
        }
        names
    }

    /// Rows for one district, ascending by year. Case-insensitive exact match.
    pub fn for_district(&self, district: &str) -> Vec<HistoricalRecord> {
        self.records
            .iter()
            .filter(|r| r.is_district(district))
            .cloned()
            .collect()
    }

    /// The dataset's spelling of a district name
    pub fn canonical_district(&self, district: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.is_district(district))
            .map(|r| r.district.as_str())
    }

    pub fn latest_for_district(&self, district: &str) -> Option<&HistoricalRecord> {
        self.records
            .iter()
            .filter(|r| r.is_district(district))
            .max_by_key(|r| r.year)
    }

    pub fn earliest_year(&self) -> i32 {
        self.records
            .iter()
            .map(|r| r.year)
            .min()
            .unwrap_or(self.latest_year)
    }

    pub fn latest_year(&self) -> i32 {
        self.latest_year
    }

    /// Forecasts always target the year after the final dataset year
    pub fn forecast_year(&self) -> i32 {
        self.latest_year + 1
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }
}
