//! In-Memory Engine
//!
//! A complete software stand-in for the native EQ: it stores every value it
//! is given, answers reads from that store, and keeps an ordered log of the
//! commands it received. Hosts use it where no native engine exists yet;
//! tests use the log to check call ordering.

use parking_lot::Mutex;

use crate::bridge::DEFAULT_PRESET_NAME;
use crate::error::{NativeError, NativeResult};
use crate::traits::NativeEngine;

/// A command received by `MemoryEngine` (reads are not logged)
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    SetEnabled(bool),
    SetBandGain { index: usize, gain: f32 },
    SetMasterGain(f32),
    SetPreset(String),
    BeginBatch,
    EndBatch,
    StartSpectrumAnalysis,
    StopSpectrumAnalysis,
}

#[derive(Debug)]
struct MemoryState {
    enabled: bool,
    gains: Vec<f32>,
    master_gain: f32,
    preset: String,
    presets: Vec<String>,
    batch_depth: usize,
    analysing: bool,
    spectrum: Option<Vec<f32>>,
    calls: Vec<NativeCall>,
}

/// Software engine with a fixed number of bands
#[derive(Debug)]
pub struct MemoryEngine {
    state: Mutex<MemoryState>,
}

impl MemoryEngine {
    /// Create an engine with `bands` flat bands, disabled
    pub fn new(bands: usize) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                enabled: false,
                gains: vec![0.0; bands],
                master_gain: 0.0,
                preset: DEFAULT_PRESET_NAME.to_string(),
                presets: Vec::new(),
                batch_depth: 0,
                analysing: false,
                spectrum: None,
                calls: Vec::new(),
            }),
        }
    }

    /// Declare the preset names this engine can select
    pub fn with_presets<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.lock().presets = names.into_iter().map(Into::into).collect();
        self
    }

    /// Feed the analyser a frame; it is returned while analysis is running
    pub fn push_spectrum(&self, frame: Vec<f32>) {
        self.state.lock().spectrum = Some(frame);
    }

    /// Ordered log of commands received so far
    pub fn calls(&self) -> Vec<NativeCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Snapshot of all band gains
    pub fn gains(&self) -> Vec<f32> {
        self.state.lock().gains.clone()
    }

    pub fn is_analysing(&self) -> bool {
        self.state.lock().analysing
    }

    /// Open batch hints not yet closed
    pub fn batch_depth(&self) -> usize {
        self.state.lock().batch_depth
    }

    fn band_out_of_range(index: usize, bands: usize) -> NativeError {
        NativeError::BandOutOfRange { index, bands }
    }
}

impl NativeEngine for MemoryEngine {
    fn name(&self) -> &'static str {
        "Memory"
    }

    fn set_enabled(&self, enabled: bool) -> NativeResult<()> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::SetEnabled(enabled));
        state.enabled = enabled;
        Ok(())
    }

    fn set_band_gain(&self, index: usize, gain_db: f32) -> NativeResult<()> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::SetBandGain { index, gain: gain_db });
        let bands = state.gains.len();
        let slot = state
            .gains
            .get_mut(index)
            .ok_or_else(|| Self::band_out_of_range(index, bands))?;
        *slot = gain_db;
        Ok(())
    }

    fn band_gain(&self, index: usize) -> NativeResult<f32> {
        let state = self.state.lock();
        state
            .gains
            .get(index)
            .copied()
            .ok_or_else(|| Self::band_out_of_range(index, state.gains.len()))
    }

    fn enabled(&self) -> NativeResult<bool> {
        Ok(self.state.lock().enabled)
    }

    fn master_gain(&self) -> NativeResult<f32> {
        Ok(self.state.lock().master_gain)
    }

    fn set_master_gain(&self, gain_db: f32) -> NativeResult<()> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::SetMasterGain(gain_db));
        state.master_gain = gain_db;
        Ok(())
    }

    fn set_preset(&self, name: &str) -> NativeResult<()> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::SetPreset(name.to_string()));
        let known = state
            .presets
            .iter()
            .find(|p| p.eq_ignore_ascii_case(name))
            .cloned();
        match known {
            Some(preset) => {
                state.preset = preset;
                Ok(())
            }
            None => Err(NativeError::CallFailed {
                method: "set_preset",
                message: format!("unknown preset {name}"),
            }),
        }
    }

    fn current_preset(&self) -> NativeResult<String> {
        Ok(self.state.lock().preset.clone())
    }

    fn available_presets(&self) -> NativeResult<Vec<String>> {
        Ok(self.state.lock().presets.clone())
    }

    fn begin_batch(&self) -> NativeResult<()> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::BeginBatch);
        state.batch_depth += 1;
        Ok(())
    }

    fn end_batch(&self) -> NativeResult<()> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::EndBatch);
        state.batch_depth = state.batch_depth.saturating_sub(1);
        Ok(())
    }

    fn start_spectrum_analysis(&self) -> NativeResult<()> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::StartSpectrumAnalysis);
        state.analysing = true;
        Ok(())
    }

    fn stop_spectrum_analysis(&self) -> NativeResult<()> {
        let mut state = self.state.lock();
        state.calls.push(NativeCall::StopSpectrumAnalysis);
        state.analysing = false;
        Ok(())
    }

    fn spectrum_data(&self) -> NativeResult<Option<Vec<f32>>> {
        let state = self.state.lock();
        if !state.analysing {
            return Ok(None);
        }
        Ok(state.spectrum.clone())
    }
}
