//! Equaliser Band Model
//!
//! A band is one parametric filter stage. The coordinator only stores and
//! forwards band gains; the filter math itself lives in the native engine.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::DspError;

/// Lowest gain any band may hold (dB)
pub const MIN_GAIN: f32 = -24.0;

/// Highest gain any band may hold (dB)
pub const MAX_GAIN: f32 = 24.0;

/// Default quality factor for the built-in layout
pub const DEFAULT_Q: f32 = 0.7;

/// Standard layout: ISO octave centers, shelves at both ends
const DEFAULT_BANDS: [(&str, f32, BandType, &str); 10] = [
    ("band-32", 32.0, BandType::LowShelf, "32Hz"),
    ("band-64", 64.0, BandType::Peaking, "64Hz"),
    ("band-125", 125.0, BandType::Peaking, "125Hz"),
    ("band-250", 250.0, BandType::Peaking, "250Hz"),
    ("band-500", 500.0, BandType::Peaking, "500Hz"),
    ("band-1k", 1000.0, BandType::Peaking, "1kHz"),
    ("band-2k", 2000.0, BandType::Peaking, "2kHz"),
    ("band-4k", 4000.0, BandType::Peaking, "4kHz"),
    ("band-8k", 8000.0, BandType::Peaking, "8kHz"),
    ("band-16k", 16000.0, BandType::HighShelf, "16kHz"),
];

/// Filter type for each EQ band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandType {
    LowShelf,
    HighShelf,
    Peaking,
    LowPass,
    HighPass,
    Notch,
}

/// Static description of a band in a layout (everything but the gain)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSpec {
    pub id: String,
    pub frequency: f32,
    pub q: f32,
    #[serde(rename = "type")]
    pub band_type: BandType,
    pub label: String,
}

impl BandSpec {
    pub fn new(id: impl Into<String>, frequency: f32, band_type: BandType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            frequency,
            q: DEFAULT_Q,
            band_type,
            label: label.into(),
        }
    }
}

/// A band in the active configuration
///
/// `index` is the dense position in the active layout and doubles as the
/// native engine's band index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub id: String,
    pub index: usize,
    pub frequency: f32,
    pub q: f32,
    #[serde(rename = "type")]
    pub band_type: BandType,
    pub label: String,
    pub gain: f32,
}

impl Band {
    /// Build a flat (0 dB) band from its layout entry
    pub fn from_spec(index: usize, spec: &BandSpec) -> Self {
        Self {
            id: spec.id.clone(),
            index,
            frequency: spec.frequency,
            q: spec.q,
            band_type: spec.band_type,
            label: spec.label.clone(),
            gain: 0.0,
        }
    }

    /// Copy of this band carrying a different gain
    pub fn with_gain(&self, gain: f32) -> Self {
        Self {
            gain,
            ..self.clone()
        }
    }
}

/// The built-in 10-band layout
pub fn default_layout() -> Vec<BandSpec> {
    DEFAULT_BANDS
        .iter()
        .map(|&(id, frequency, band_type, label)| BandSpec::new(id, frequency, band_type, label))
        .collect()
}

/// Clamp a gain into `[min, max]`
///
/// NaN carries no usable intent and maps to 0 dB so stored gains always stay
/// inside the limits.
pub fn clamp_gain(gain: f32, min: f32, max: f32) -> f32 {
    if gain.is_nan() {
        return 0.0_f32.clamp(min, max);
    }
    gain.clamp(min, max)
}

/// Check that a layout can back an equaliser: non-empty, unique ids,
/// positive finite frequencies and Q values
pub fn validate_layout(layout: &[BandSpec]) -> Result<(), DspError> {
    if layout.is_empty() {
        return Err(DspError::EmptyLayout);
    }

    let mut seen = HashSet::with_capacity(layout.len());
    for spec in layout {
        if !seen.insert(spec.id.as_str()) {
            return Err(DspError::DuplicateBandId(spec.id.clone()));
        }
        if !spec.frequency.is_finite() || spec.frequency <= 0.0 {
            return Err(DspError::InvalidFrequency {
                id: spec.id.clone(),
                frequency: spec.frequency,
            });
        }
        if !spec.q.is_finite() || spec.q <= 0.0 {
            return Err(DspError::InvalidQ {
                id: spec.id.clone(),
                q: spec.q,
            });
        }
    }
    Ok(())
}
