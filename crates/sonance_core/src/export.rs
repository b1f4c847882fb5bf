//! Exported Configuration
//!
//! The one serialized shape the coordinator defines. Hosts persist it however
//! they like and hand it back to `Equaliser::import_configuration`.

use serde::{Deserialize, Serialize};
use sonance_dsp::Band;

use crate::error::{EqError, EqResult};

/// Processing quality hint carried with an exported configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    #[default]
    High,
    Ultra,
}

/// Oversampling factor, serialized as the bare number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OversamplingRate {
    X1,
    #[default]
    X2,
    X4,
    X8,
}

impl OversamplingRate {
    pub fn factor(self) -> u8 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }
}

impl From<OversamplingRate> for u8 {
    fn from(rate: OversamplingRate) -> Self {
        rate.factor()
    }
}

impl TryFrom<u8> for OversamplingRate {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::X1),
            2 => Ok(Self::X2),
            4 => Ok(Self::X4),
            8 => Ok(Self::X8),
            other => Err(format!("unsupported oversampling rate {other}")),
        }
    }
}

/// Snapshot produced by `export_configuration`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualiserConfig {
    pub bands: Vec<Band>,
    pub preset: Option<String>,
    pub enabled: bool,
    pub output_gain: f32,
    pub input_gain: f32,
    pub quality: Quality,
    pub oversampling_rate: OversamplingRate,
}

impl EqualiserConfig {
    pub fn to_json(&self) -> EqResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EqError::InvalidConfig(e.to_string()))
    }

    pub fn from_json(json: &str) -> EqResult<Self> {
        serde_json::from_str(json).map_err(|e| EqError::InvalidConfig(e.to_string()))
    }
}
