//! Coordinator Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sonance_dsp::{default_layout, validate_layout, Band, BandSpec, PresetCatalog, MAX_GAIN, MIN_GAIN};

use crate::error::{EqError, EqResult};

/// Everything the coordinator needs to know up front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Active band layout; its length is fixed for the coordinator's lifetime
    pub bands: Vec<BandSpec>,

    /// Bands at or beyond this index are never sent to the native engine
    pub native_band_limit: usize,

    /// Native band writes between scheduler yields while applying a preset
    pub apply_chunk_size: usize,

    /// Spectrum polling period in milliseconds
    pub spectrum_interval_ms: u64,

    /// Number of spectrum channels published per snapshot
    pub spectrum_channels: usize,

    /// Magnitude a local maximum must exceed to be reported as a peak
    pub peak_threshold: f32,

    /// Band gain limits (dB)
    pub min_gain: f32,
    pub max_gain: f32,

    /// Input/output gains clamp to +/- this value (dB)
    pub master_gain_limit: f32,

    /// Presets selectable by id
    pub presets: PresetCatalog,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            bands: default_layout(),
            native_band_limit: 10,
            apply_chunk_size: 3,
            spectrum_interval_ms: 50,
            spectrum_channels: sonance_dsp::SPECTRUM_CHANNELS,
            peak_threshold: sonance_dsp::PEAK_THRESHOLD,
            min_gain: MIN_GAIN,
            max_gain: MAX_GAIN,
            master_gain_limit: 24.0,
            presets: PresetCatalog::builtin(),
        }
    }
}

impl CoordinatorConfig {
    /// Validate configuration
    pub fn validate(&self) -> EqResult<()> {
        validate_layout(&self.bands)?;

        if !(self.min_gain.is_finite() && self.max_gain.is_finite()) || self.min_gain >= self.max_gain {
            return Err(EqError::InvalidConfig(format!(
                "Invalid gain range: {} to {}",
                self.min_gain, self.max_gain
            )));
        }
        if !self.master_gain_limit.is_finite() || self.master_gain_limit <= 0.0 {
            return Err(EqError::InvalidConfig(format!(
                "Invalid master gain limit: {}",
                self.master_gain_limit
            )));
        }
        if self.apply_chunk_size == 0 {
            return Err(EqError::InvalidConfig("Apply chunk size must be at least 1".into()));
        }
        if self.spectrum_interval_ms == 0 {
            return Err(EqError::InvalidConfig("Spectrum interval must be positive".into()));
        }
        if self.spectrum_channels == 0 {
            return Err(EqError::InvalidConfig("Spectrum needs at least one channel".into()));
        }
        if !(0.0..=1.0).contains(&self.peak_threshold) {
            return Err(EqError::InvalidConfig(format!(
                "Invalid peak threshold: {}",
                self.peak_threshold
            )));
        }
        Ok(())
    }

    /// Spectrum polling period
    pub fn spectrum_interval(&self) -> Duration {
        Duration::from_millis(self.spectrum_interval_ms)
    }

    /// Flat, dense-indexed bands for the configured layout
    pub fn initial_bands(&self) -> Vec<Band> {
        self.bands
            .iter()
            .enumerate()
            .map(|(index, spec)| Band::from_spec(index, spec))
            .collect()
    }
}
