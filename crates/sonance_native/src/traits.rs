//! Native Engine Trait
//!
//! Defines the interface a native EQ engine exposes to the coordinator.

use crate::error::{NativeError, NativeResult};

/// Trait for native parametric EQ engines
///
/// Only the enable flag and per-band gain are required. Everything else has
/// a default body returning `NativeError::Unsupported`, so an engine states
/// what it supports by what it overrides.
///
/// Methods take `&self`; implementations use interior mutability so one
/// engine can be shared between the coordinator and its background tasks.
pub trait NativeEngine: Send + Sync {
    /// Get the name of this engine (for logs)
    fn name(&self) -> &'static str;

    /// Turn the audio effect on or off
    fn set_enabled(&self, enabled: bool) -> NativeResult<()>;

    /// Set gain (dB) for the band at `index`
    fn set_band_gain(&self, index: usize, gain_db: f32) -> NativeResult<()>;

    /// Read back gain (dB) for the band at `index`
    fn band_gain(&self, index: usize) -> NativeResult<f32>;

    /// Read the enable flag
    fn enabled(&self) -> NativeResult<bool> {
        Err(NativeError::Unsupported("enabled"))
    }

    /// Read the master (output) gain in dB
    fn master_gain(&self) -> NativeResult<f32> {
        Err(NativeError::Unsupported("master_gain"))
    }

    /// Set the master (output) gain in dB
    fn set_master_gain(&self, _gain_db: f32) -> NativeResult<()> {
        Err(NativeError::Unsupported("set_master_gain"))
    }

    /// Select a preset the engine knows by name
    fn set_preset(&self, _name: &str) -> NativeResult<()> {
        Err(NativeError::Unsupported("set_preset"))
    }

    /// Name of the preset the engine currently reports
    fn current_preset(&self) -> NativeResult<String> {
        Err(NativeError::Unsupported("current_preset"))
    }

    /// Preset names the engine can select natively
    fn available_presets(&self) -> NativeResult<Vec<String>> {
        Err(NativeError::Unsupported("available_presets"))
    }

    /// Hint that several band updates follow and may be coalesced
    fn begin_batch(&self) -> NativeResult<()> {
        Err(NativeError::Unsupported("begin_batch"))
    }

    /// Hint that the current group of band updates is complete
    fn end_batch(&self) -> NativeResult<()> {
        Err(NativeError::Unsupported("end_batch"))
    }

    fn start_spectrum_analysis(&self) -> NativeResult<()> {
        Err(NativeError::Unsupported("start_spectrum_analysis"))
    }

    fn stop_spectrum_analysis(&self) -> NativeResult<()> {
        Err(NativeError::Unsupported("stop_spectrum_analysis"))
    }

    /// Latest spectrum magnitudes, if the analyser has a frame ready
    fn spectrum_data(&self) -> NativeResult<Option<Vec<f32>>> {
        Err(NativeError::Unsupported("spectrum_data"))
    }
}
