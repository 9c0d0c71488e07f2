use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The four families of compliance test the tool can report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Water,
    Air,
    Soil,
    Noise,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown report kind '{0}' (expected water, air, soil or noise)")]
pub struct ParseReportKindError(pub String);

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Water,
        ReportKind::Air,
        ReportKind::Soil,
        ReportKind::Noise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Water => "water",
            ReportKind::Air => "air",
            ReportKind::Soil => "soil",
            ReportKind::Noise => "noise",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ParseReportKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "water" => Ok(ReportKind::Water),
            "air" => Ok(ReportKind::Air),
            "soil" => Ok(ReportKind::Soil),
            "noise" => Ok(ReportKind::Noise),
            _ => Err(ParseReportKindError(s.to_string())),
        }
    }
}
