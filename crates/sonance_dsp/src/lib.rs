//! Sonance DSP - Equaliser Domain Model
//!
//! This crate holds the pure, I/O-free parts of the equaliser coordinator:
//! - Band model and the default 10-band ISO layout
//! - Preset model and the built-in preset catalog
//! - Preset resolution onto whatever band layout is active
//! - Spectrum normalisation and peak detection
//!
//! Nothing here talks to the native engine or keeps shared state; every
//! function is deterministic so the coordinator can call it from any task.

mod band;
mod error;
mod presets;
mod resolver;
mod spectrum;

pub use band::{clamp_gain, default_layout, validate_layout, Band, BandSpec, BandType, DEFAULT_Q, MAX_GAIN, MIN_GAIN};
pub use error::DspError;
pub use presets::{normalize_preset_name, Preset, PresetCatalog, PresetCategory, FLAT_PRESET_ID};
pub use resolver::{parse_band_key, resolve, resolve_bands, resolve_gain, Resolution, ResolutionSource};
pub use spectrum::{
    channel_frequencies, detect_peaks, normalize_magnitudes, SpectrumSnapshot, PEAK_THRESHOLD,
    SPECTRUM_CHANNELS,
};
