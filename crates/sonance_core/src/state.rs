//! Equaliser State
//!
//! `EqualiserState` is what listeners and callers see. `StateUpdate` is a
//! partial state: the unit that is either applied directly or buffered by a
//! batch until it commits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sonance_dsp::{Band, SpectrumSnapshot};

/// Full coordinator state, handed out as a copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualiserState {
    pub enabled: bool,
    pub bypassed: bool,
    /// Preset id, `None` once a manual edit makes the curve custom
    pub current_preset: Option<String>,
    pub bands: Vec<Band>,
    pub input_gain: f32,
    pub output_gain: f32,
    pub analysis_enabled: bool,
    pub spectrum_data: Option<SpectrumSnapshot>,
    pub soloed_band: Option<String>,
}

impl EqualiserState {
    /// Initial state: disabled, flat, nothing soloed, no analysis
    pub fn new(bands: Vec<Band>) -> Self {
        Self {
            enabled: false,
            bypassed: false,
            current_preset: None,
            bands,
            input_gain: 0.0,
            output_gain: 0.0,
            analysis_enabled: false,
            spectrum_data: None,
            soloed_band: None,
        }
    }

    pub fn band(&self, id: &str) -> Option<&Band> {
        self.bands.iter().find(|b| b.id == id)
    }

    /// Whether the native effect should be running
    pub fn native_enabled(&self) -> bool {
        self.enabled && !self.bypassed
    }
}

/// A partial state update
///
/// Nullable fields use `Option<Option<_>>`: the outer `None` means "leave as
/// is", `Some(None)` means "clear". Per-band gains are keyed by band index
/// so that edits to different bands merge instead of overwriting each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub enabled: Option<bool>,
    pub bypassed: Option<bool>,
    pub current_preset: Option<Option<String>>,
    pub bands: Option<Vec<Band>>,
    pub band_gains: BTreeMap<usize, f32>,
    pub input_gain: Option<f32>,
    pub output_gain: Option<f32>,
    pub analysis_enabled: Option<bool>,
    pub spectrum_data: Option<Option<SpectrumSnapshot>>,
    pub soloed_band: Option<Option<String>>,
}

impl StateUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fold a later update into this one; later values win
    pub fn merge(&mut self, later: StateUpdate) {
        // A full band replacement supersedes any earlier per-band edit
        if later.bands.is_some() {
            self.bands = later.bands;
            self.band_gains.clear();
        }
        self.band_gains.extend(later.band_gains);

        merge_field(&mut self.enabled, later.enabled);
        merge_field(&mut self.bypassed, later.bypassed);
        merge_field(&mut self.current_preset, later.current_preset);
        merge_field(&mut self.input_gain, later.input_gain);
        merge_field(&mut self.output_gain, later.output_gain);
        merge_field(&mut self.analysis_enabled, later.analysis_enabled);
        merge_field(&mut self.spectrum_data, later.spectrum_data);
        merge_field(&mut self.soloed_band, later.soloed_band);
    }

    /// Apply onto a full state: band replacement first, then per-band gains
    pub fn apply_to(self, state: &mut EqualiserState) {
        if let Some(bands) = self.bands {
            state.bands = bands;
        }
        for (index, gain) in self.band_gains {
            if let Some(band) = state.bands.get_mut(index) {
                band.gain = gain;
            }
        }

        if let Some(v) = self.enabled {
            state.enabled = v;
        }
        if let Some(v) = self.bypassed {
            state.bypassed = v;
        }
        if let Some(v) = self.current_preset {
            state.current_preset = v;
        }
        if let Some(v) = self.input_gain {
            state.input_gain = v;
        }
        if let Some(v) = self.output_gain {
            state.output_gain = v;
        }
        if let Some(v) = self.analysis_enabled {
            state.analysis_enabled = v;
        }
        if let Some(v) = self.spectrum_data {
            state.spectrum_data = v;
        }
        if let Some(v) = self.soloed_band {
            state.soloed_band = v;
        }
    }
}

fn merge_field<T>(slot: &mut Option<T>, later: Option<T>) {
    if later.is_some() {
        *slot = later;
    }
}
