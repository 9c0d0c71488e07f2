use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    Water,
    Air,
    Soil,
    Waste,
    Other,
}

/// A sample logged at collection time, before any report exists for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub company_name: String,
    pub sample_code: String,
    pub collection_date: NaiveDate,
    pub sample_type: SampleType,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sample type '{0}' (expected water, air, soil, waste or other)")]
pub struct ParseSampleTypeError(pub String);

impl std::str::FromStr for SampleType {
    type Err = ParseSampleTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "water" => Ok(SampleType::Water),
            "air" => Ok(SampleType::Air),
            "soil" => Ok(SampleType::Soil),
            "waste" => Ok(SampleType::Waste),
            "other" => Ok(SampleType::Other),
            _ => Err(ParseSampleTypeError(s.to_string())),
        }
    }
}
