//! Spectrum Snapshot Math
//!
//! Turns a raw magnitude array from the native analyser into a fixed-size,
//! clamped snapshot with peak indices for visualization.

use serde::{Deserialize, Serialize};

/// Number of spectrum channels published to the UI
pub const SPECTRUM_CHANNELS: usize = 32;

/// A local maximum must exceed this magnitude to count as a peak
pub const PEAK_THRESHOLD: f32 = 0.3;

/// Display range covered by the channels (Hz)
const MIN_DISPLAY_HZ: f32 = 20.0;
const MAX_DISPLAY_HZ: f32 = 20000.0;

/// One published spectrum frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumSnapshot {
    /// Center frequency of each channel (Hz)
    pub frequencies: Vec<f32>,
    /// Magnitude per channel, 0.0 to 1.0
    pub magnitudes: Vec<f32>,
    /// Indices into `magnitudes` that are strict local maxima above the threshold
    pub peaks: Vec<usize>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl SpectrumSnapshot {
    /// Build a snapshot from raw native magnitudes
    pub fn from_raw(raw: &[f32], channels: usize, peak_threshold: f32, timestamp: i64) -> Self {
        let magnitudes = normalize_magnitudes(raw, channels);
        let peaks = detect_peaks(&magnitudes, peak_threshold);
        Self {
            frequencies: channel_frequencies(channels),
            magnitudes,
            peaks,
            timestamp,
        }
    }
}

/// Clamp every value to `[0, 1]` and fit the result to exactly `channels`
/// entries: extra values are dropped, missing ones read as silence
pub fn normalize_magnitudes(raw: &[f32], channels: usize) -> Vec<f32> {
    let mut out: Vec<f32> = raw
        .iter()
        .take(channels)
        .map(|&v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
        .collect();
    out.resize(channels, 0.0);
    out
}

/// Single left-to-right scan for strict local maxima
///
/// Index `i` (1 <= i <= len-2) is a peak iff it is strictly greater than both
/// neighbours and strictly greater than `threshold`. Plateaus never peak.
pub fn detect_peaks(magnitudes: &[f32], threshold: f32) -> Vec<usize> {
    magnitudes
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] > w[2] && w[1] > threshold)
        .map(|(i, _)| i + 1)
        .collect()
}

/// Logarithmically spaced channel centers from 20 Hz to 20 kHz
pub fn channel_frequencies(channels: usize) -> Vec<f32> {
    let ratio = MAX_DISPLAY_HZ / MIN_DISPLAY_HZ;
    (0..channels)
        .map(|i| {
            let position = (i as f32 + 0.5) / channels as f32;
            MIN_DISPLAY_HZ * ratio.powf(position)
        })
        .collect()
}
