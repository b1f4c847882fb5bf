//! Equaliser Coordinator
//!
//! The single source of truth for EQ state. Every mutation funnels through
//! an [`Equaliser`] handle:
//!
//! ```text
//!   UI ──set_*()──▶ Equaliser ──▶ NativeBridge (immediate, best effort)
//!                      │
//!                      ├──▶ state (direct) or Batch buffer
//!                      │        └──▶ EventBus: stateChanged, bandChanged, ...
//!                      │
//!                      ├──set_preset()──▶ BatchApplier task (chunked, cancellable)
//!                      │
//!                      └──start_spectrum_analysis()──▶ SpectrumSampler task
//! ```
//!
//! The handle is cheap to clone; clones share one coordinator. Background
//! tasks run on the tokio runtime captured at construction and hold only
//! weak references back to it.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use serde::{Deserialize, Serialize};
use sonance_dsp::{clamp_gain, normalize_preset_name, resolve_bands, Band, Preset, PresetCatalog, SpectrumSnapshot};
use sonance_native::NativeBridge;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::applier::{ApplyHandle, ApplyOutcome, BandWrite, BatchApplier, CancelToken};
use crate::batch::{Batch, BatchBuffer};
use crate::config::CoordinatorConfig;
use crate::error::{EqError, EqResult};
use crate::events::{
    BandChange, BandChanged, BypassChanged, EnabledChanged, ErrorEvent, Event, EventBus, PresetChanged,
    SpectrumData, StateChanged, Subscription,
};
use crate::export::{EqualiserConfig, OversamplingRate, Quality};
use crate::sampler::{SpectrumProbe, SpectrumSampler, SpectrumSink};
use crate::state::{EqualiserState, StateUpdate};

/// Frequencies closer than this are the same band when importing (Hz)
const FREQUENCY_MATCH_TOLERANCE: f32 = 1e-3;

/// Where a mutation's state update goes
pub(crate) enum Scope<'a> {
    Direct,
    Batched(&'a Mutex<BatchBuffer>),
}

impl Scope<'_> {
    fn is_batched(&self) -> bool {
        matches!(self, Scope::Batched(_))
    }

    /// Enable and bypass flags as they will be once every open batch in this
    /// scope's chain has committed
    fn pending_flags(&self, state: &EqualiserState) -> (bool, bool) {
        let Scope::Batched(buffer) = self else {
            return (state.enabled, state.bypassed);
        };

        // Innermost batch wins, then its parents
        let (mut enabled, mut bypassed, mut next) = {
            let buffer = buffer.lock();
            (buffer.update.enabled, buffer.update.bypassed, buffer.parent.clone())
        };
        while let Some(parent) = next {
            let parent = parent.lock();
            enabled = enabled.or(parent.update.enabled);
            bypassed = bypassed.or(parent.update.bypassed);
            next = parent.parent.clone();
        }
        (enabled.unwrap_or(state.enabled), bypassed.unwrap_or(state.bypassed))
    }
}

/// Optional per-band parameter changes for [`Equaliser::set_band_parameters`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BandParameters {
    pub gain: Option<f32>,
    pub frequency: Option<f32>,
    pub q: Option<f32>,
}

struct Inner {
    config: CoordinatorConfig,
    bridge: NativeBridge,
    bus: EventBus,
    state: Mutex<EqualiserState>,
    /// Serializes commit + stateChanged so emissions follow mutation order;
    /// reentrant so listeners may mutate
    emit_order: ReentrantMutex<()>,
    catalog: RwLock<PresetCatalog>,
    applier: BatchApplier,
    sampler: SpectrumSampler,
    runtime: Handle,
    batch_depth: AtomicUsize,
    disposed: AtomicBool,
}

impl Inner {
    fn commit(&self, update: StateUpdate) {
        let _order = self.emit_order.lock();
        let snapshot = {
            let mut state = self.state.lock();
            update.apply_to(&mut state);
            state.clone()
        };
        self.bus.emit::<StateChanged>(&snapshot);
    }

    fn route(&self, scope: Scope<'_>, update: StateUpdate) {
        match scope {
            Scope::Direct => self.commit(update),
            Scope::Batched(buffer) => buffer.lock().update.merge(update),
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Gain native should hold for the band at `index` right now
    fn native_gain(&self, index: usize) -> Option<f32> {
        let state = self.state.lock();
        let band = state.bands.iter().find(|b| b.index == index)?;
        Some(match state.soloed_band.as_deref() {
            Some(solo) if solo != band.id => self.config.min_gain,
            _ => band.gain,
        })
    }

    fn native_indices(&self) -> Vec<usize> {
        self.state
            .lock()
            .bands
            .iter()
            .map(|b| b.index)
            .filter(|&index| index < self.config.native_band_limit)
            .collect()
    }
}

impl SpectrumSink for Inner {
    fn publish(&self, snapshot: SpectrumSnapshot) {
        // Held across the check so a concurrent stop commits after this frame
        let _order = self.emit_order.lock();
        if self.is_disposed() || !self.sampler.is_running() {
            debug!("sampler stopped, spectrum frame dropped");
            return;
        }
        self.commit(StateUpdate {
            spectrum_data: Some(Some(snapshot.clone())),
            ..Default::default()
        });
        self.bus.emit::<SpectrumData>(&snapshot);
    }

    fn report(&self, error: EqError) {
        self.bus.emit::<ErrorEvent>(&error);
    }
}

/// Handle to the equaliser coordinator
#[derive(Clone)]
pub struct Equaliser {
    inner: Arc<Inner>,
}

impl fmt::Debug for Equaliser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equaliser")
            .field("engine", &self.inner.bridge.engine_name())
            .field("bands", &self.inner.config.bands.len())
            .field("disposed", &self.inner.is_disposed())
            .finish()
    }
}

impl Equaliser {
    /// Create a coordinator on the current tokio runtime
    pub fn new(bridge: NativeBridge, config: CoordinatorConfig) -> EqResult<Self> {
        let runtime = Handle::try_current().map_err(|_| EqError::NoRuntime)?;
        Self::with_runtime(bridge, config, runtime)
    }

    /// Create a coordinator whose background tasks run on `runtime`
    pub fn with_runtime(bridge: NativeBridge, config: CoordinatorConfig, runtime: Handle) -> EqResult<Self> {
        config.validate()?;

        let state = EqualiserState::new(config.initial_bands());
        let probe = SpectrumProbe::new(bridge.clone(), config.spectrum_channels, config.peak_threshold);

        info!(
            engine = bridge.engine_name(),
            bands = config.bands.len(),
            presets = config.presets.len(),
            "equaliser created"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                applier: BatchApplier::new(bridge.clone(), config.apply_chunk_size),
                sampler: SpectrumSampler::new(probe),
                catalog: RwLock::new(config.presets.clone()),
                bus: EventBus::new(),
                state: Mutex::new(state),
                emit_order: ReentrantMutex::new(()),
                batch_depth: AtomicUsize::new(0),
                disposed: AtomicBool::new(false),
                bridge,
                config,
                runtime,
            }),
        })
    }

    // ========================================================================
    // Reads and subscriptions
    // ========================================================================

    /// Copy of the current state
    pub fn state(&self) -> EqualiserState {
        self.inner.state.lock().clone()
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.bus
    }

    /// Shorthand for `events().on::<E, _>(listener)`
    pub fn on<E, F>(&self, listener: F) -> Subscription
    where
        E: Event,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        self.inner.bus.on::<E, F>(listener)
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    pub fn bridge(&self) -> &NativeBridge {
        &self.inner.bridge
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    // ========================================================================
    // Batches
    // ========================================================================

    /// Open a root batch; see [`Batch`]
    pub fn begin_batch(&self) -> Batch {
        Batch::open(self.clone(), None)
    }

    pub(crate) fn enter_native_batch(&self) {
        if self.inner.batch_depth.fetch_add(1, Ordering::SeqCst) == 0 {
            self.inner.bridge.begin_batch();
        }
    }

    pub(crate) fn leave_native_batch(&self) {
        let previous = self
            .inner
            .batch_depth
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |depth| depth.checked_sub(1));
        if previous == Ok(1) {
            self.inner.bridge.end_batch();
        }
    }

    pub(crate) fn commit_batch(&self, update: StateUpdate) {
        if self.inner.is_disposed() {
            debug!("batch ended after dispose, update dropped");
            return;
        }
        self.inner.commit(update);
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub fn set_enabled(&self, enabled: bool) -> EqResult<()> {
        self.apply_enabled(Scope::Direct, enabled)
    }

    /// Bypass drives the native enable flag; the logical `enabled` is kept
    pub fn set_bypass(&self, bypassed: bool) -> EqResult<()> {
        self.apply_bypass(Scope::Direct, bypassed)
    }

    /// Clamp and store a band gain; clears the current preset
    pub fn set_band_gain(&self, band_id: &str, gain: f32) -> EqResult<()> {
        self.apply_band_gain(Scope::Direct, band_id, gain)
    }

    /// Gain goes through [`set_band_gain`](Self::set_band_gain); frequency and
    /// Q changes are only reported on `bandChanged`
    pub fn set_band_parameters(&self, band_id: &str, params: BandParameters) -> EqResult<()> {
        self.ensure_live()?;
        if self.inner.state.lock().band(band_id).is_none() {
            return self.fail(EqError::BandNotFound(band_id.to_string()));
        }

        if let Some(gain) = params.gain {
            self.set_band_gain(band_id, gain)?;
        }

        if params.frequency.is_some() || params.q.is_some() {
            let gain = self.inner.state.lock().band(band_id).map_or(0.0, |b| b.gain);
            self.inner.bus.emit::<BandChanged>(&BandChange {
                band_id: band_id.to_string(),
                gain,
                frequency: params.frequency,
                q: params.q,
            });
        }
        Ok(())
    }

    /// Solo one band (mute every other band natively) or clear solo
    ///
    /// Stored gains are never touched; clearing solo restores every band's
    /// native gain from them.
    pub fn set_solo_band(&self, band_id: Option<&str>) -> EqResult<()> {
        self.ensure_live()?;
        if let Some(id) = band_id {
            if self.inner.state.lock().band(id).is_none() {
                return self.fail(EqError::BandNotFound(id.to_string()));
            }
        }

        debug!(band = ?band_id, "solo band");
        self.inner.commit(StateUpdate {
            soloed_band: Some(band_id.map(str::to_string)),
            ..Default::default()
        });

        // Gains are looked up under the applier gate, so a running preset
        // apply and this pass agree on what native ends up with
        let inner = &self.inner;
        self.enter_native_batch();
        inner
            .applier
            .write_current(&inner.native_indices(), |index| inner.native_gain(index));
        self.leave_native_batch();
        Ok(())
    }

    /// State only; the native engine has no input stage
    pub fn set_input_gain(&self, gain: f32) -> EqResult<()> {
        self.apply_input_gain(Scope::Direct, gain)
    }

    /// Forwarded to the native master gain
    pub fn set_output_gain(&self, gain: f32) -> EqResult<()> {
        self.apply_output_gain(Scope::Direct, gain)
    }

    pub(crate) fn apply_enabled(&self, scope: Scope<'_>, enabled: bool) -> EqResult<()> {
        self.ensure_live()?;
        let (_, bypassed) = scope.pending_flags(&self.inner.state.lock());
        self.inner.bridge.set_enabled(enabled && !bypassed);

        debug!(enabled, batched = scope.is_batched(), "set enabled");
        self.inner.route(
            scope,
            StateUpdate {
                enabled: Some(enabled),
                ..Default::default()
            },
        );
        self.inner.bus.emit::<EnabledChanged>(&enabled);
        Ok(())
    }

    pub(crate) fn apply_bypass(&self, scope: Scope<'_>, bypassed: bool) -> EqResult<()> {
        self.ensure_live()?;
        let (enabled, _) = scope.pending_flags(&self.inner.state.lock());
        self.inner.bridge.set_enabled(enabled && !bypassed);

        debug!(bypassed, batched = scope.is_batched(), "set bypass");
        self.inner.route(
            scope,
            StateUpdate {
                bypassed: Some(bypassed),
                ..Default::default()
            },
        );
        self.inner.bus.emit::<BypassChanged>(&bypassed);
        Ok(())
    }

    pub(crate) fn apply_band_gain(&self, scope: Scope<'_>, band_id: &str, gain: f32) -> EqResult<()> {
        self.ensure_live()?;
        let (index, soloed) = {
            let state = self.inner.state.lock();
            let index = state.bands.iter().position(|b| b.id == band_id);
            (index, state.soloed_band.clone())
        };
        let Some(index) = index else {
            return self.fail(EqError::BandNotFound(band_id.to_string()));
        };

        let gain = self.clamp_band(gain);
        if index < self.inner.config.native_band_limit {
            let native_gain = match soloed.as_deref() {
                Some(solo) if solo != band_id => self.inner.config.min_gain,
                _ => gain,
            };
            self.inner.applier.write_pinned(BandWrite {
                index,
                gain: native_gain,
            });
        }

        let mut update = StateUpdate::default();
        update.band_gains.insert(index, gain);
        if !scope.is_batched() {
            // A manual edit makes the curve custom
            update.current_preset = Some(None);
        }

        debug!(band = band_id, gain, batched = scope.is_batched(), "set band gain");
        self.inner.route(scope, update);
        self.inner.bus.emit::<BandChanged>(&BandChange::gain(band_id, gain));
        Ok(())
    }

    pub(crate) fn apply_input_gain(&self, scope: Scope<'_>, gain: f32) -> EqResult<()> {
        self.ensure_live()?;
        let gain = self.clamp_master(gain);
        self.inner.route(
            scope,
            StateUpdate {
                input_gain: Some(gain),
                ..Default::default()
            },
        );
        Ok(())
    }

    pub(crate) fn apply_output_gain(&self, scope: Scope<'_>, gain: f32) -> EqResult<()> {
        self.ensure_live()?;
        let gain = self.clamp_master(gain);
        self.inner.bridge.set_master_gain(gain);
        self.inner.route(
            scope,
            StateUpdate {
                output_gain: Some(gain),
                ..Default::default()
            },
        );
        Ok(())
    }

    pub(crate) fn apply_current_preset(&self, scope: Scope<'_>, preset: Option<String>) -> EqResult<()> {
        self.ensure_live()?;
        self.inner.route(
            scope,
            StateUpdate {
                current_preset: Some(preset),
                ..Default::default()
            },
        );
        Ok(())
    }

    // ========================================================================
    // Presets
    // ========================================================================

    /// Select a preset from the catalog
    ///
    /// State is updated and `presetChanged` emitted before this returns; the
    /// native writes run in a background task that any later preset
    /// selection supersedes.
    pub fn set_preset(&self, preset_id: &str) -> EqResult<ApplyHandle> {
        self.ensure_live()?;
        let preset = self.inner.catalog.read().get(preset_id).cloned();
        match preset {
            Some(preset) => Ok(self.apply_preset(&preset, true)),
            None => self.fail(EqError::PresetNotFound(preset_id.to_string())),
        }
    }

    /// Apply the flat preset through the same chunked path
    pub fn reset_all_bands(&self) -> EqResult<ApplyHandle> {
        self.ensure_live()?;
        Ok(self.apply_preset(&Preset::flat(), false))
    }

    fn apply_preset(&self, preset: &Preset, forward_name: bool) -> ApplyHandle {
        let (task_id, token) = self.inner.applier.issue();
        if forward_name {
            self.inner.bridge.set_preset(&preset.name);
        }

        let (bands, soloed) = {
            let state = self.inner.state.lock();
            let bands: Vec<Band> = resolve_bands(preset, &state.bands)
                .into_iter()
                .map(|band| {
                    let gain = self.clamp_band(band.gain);
                    Band { gain, ..band }
                })
                .collect();
            (bands, state.soloed_band.clone())
        };
        let writes = self.native_writes(&bands, soloed.as_deref());

        info!(preset = %preset.id, task_id, "applying preset");
        self.inner.commit(StateUpdate {
            bands: Some(bands),
            current_preset: Some(Some(preset.id.clone())),
            ..Default::default()
        });
        self.inner.bus.emit::<PresetChanged>(&Some(preset.id.clone()));

        self.spawn_apply(writes, task_id, token)
    }

    fn spawn_apply(&self, writes: Vec<BandWrite>, task_id: u64, token: CancelToken) -> ApplyHandle {
        let applier = self.inner.applier.clone();
        let weak = Arc::downgrade(&self.inner);
        let task_token = token.clone();

        let source = weak.clone();
        let current = move |write: &BandWrite| source.upgrade().and_then(|inner| inner.native_gain(write.index));

        let join = self.inner.runtime.spawn(async move {
            let outcome = applier.apply_bands(writes, task_id, task_token, current).await;
            if outcome == ApplyOutcome::Failed {
                if let Some(inner) = weak.upgrade() {
                    inner.report(EqError::Internal(format!("preset apply task {task_id} failed")));
                }
            }
            outcome
        });
        ApplyHandle::new(task_id, token, join)
    }

    /// Planned native writes for `bands`, muting everything but the soloed
    /// band; the task re-reads each gain when it writes
    fn native_writes(&self, bands: &[Band], soloed: Option<&str>) -> Vec<BandWrite> {
        bands
            .iter()
            .filter(|band| band.index < self.inner.config.native_band_limit)
            .map(|band| {
                let gain = match soloed {
                    Some(solo) if solo != band.id => self.inner.config.min_gain,
                    _ => band.gain,
                };
                BandWrite {
                    index: band.index,
                    gain,
                }
            })
            .collect()
    }

    /// Every preset in the catalog
    pub fn presets(&self) -> Vec<Preset> {
        self.inner.catalog.read().iter().cloned().collect()
    }

    /// Presets the native engine can also select by name
    ///
    /// Falls back to the whole catalog when the engine reports no names or
    /// none of them match.
    pub fn available_presets(&self) -> Vec<Preset> {
        let native: Vec<String> = self
            .inner
            .bridge
            .available_presets()
            .iter()
            .map(|name| normalize_preset_name(name))
            .collect();

        let catalog = self.inner.catalog.read();
        let supported: Vec<Preset> = catalog
            .iter()
            .filter(|p| native.contains(&normalize_preset_name(&p.name)))
            .cloned()
            .collect();

        if supported.is_empty() {
            catalog.iter().cloned().collect()
        } else {
            supported
        }
    }

    /// Register a preset, replacing any preset with the same id
    pub fn add_preset(&self, preset: Preset) -> EqResult<()> {
        self.ensure_live()?;
        if preset.id.trim().is_empty() {
            return self.fail(EqError::InvalidConfig("preset id must not be empty".into()));
        }
        debug!(preset = %preset.id, "preset registered");
        self.inner.catalog.write().insert(preset);
        Ok(())
    }

    // ========================================================================
    // Native sync
    // ========================================================================

    /// Pull enable flag, preset, master gain and band gains from native
    ///
    /// A native preset that is not in the natively supported part of the
    /// catalog leaves the current preset cleared.
    pub fn sync_from_native(&self) -> EqResult<()> {
        self.ensure_live()?;
        let bridge = &self.inner.bridge;

        let enabled = bridge.is_enabled();
        let native_preset = bridge.current_preset();
        let output_gain = self.clamp_master(bridge.master_gain());

        let preset_id = self
            .inner
            .catalog
            .read()
            .find_by_name(&native_preset)
            .map(|p| p.id.clone());
        let preset_id = preset_id.filter(|id| self.available_presets().iter().any(|p| &p.id == id));

        let bands: Vec<Band> = self
            .inner
            .state
            .lock()
            .bands
            .iter()
            .map(|band| {
                if band.index < self.inner.config.native_band_limit {
                    band.with_gain(self.clamp_band(bridge.band_gain(band.index)))
                } else {
                    band.clone()
                }
            })
            .collect();

        info!(enabled, preset = ?preset_id, "state synced from native");
        self.inner.commit(StateUpdate {
            enabled: Some(enabled),
            bypassed: Some(false),
            current_preset: Some(preset_id),
            bands: Some(bands),
            output_gain: Some(output_gain),
            ..Default::default()
        });
        Ok(())
    }

    // ========================================================================
    // Spectrum
    // ========================================================================

    /// Start sampling at the configured interval; `Ok(false)` if already running
    pub fn start_spectrum_analysis(&self) -> EqResult<bool> {
        self.start_spectrum_analysis_every(self.inner.config.spectrum_interval())
    }

    pub fn start_spectrum_analysis_every(&self, period: Duration) -> EqResult<bool> {
        self.ensure_live()?;
        if period.is_zero() {
            return self.fail(EqError::InvalidConfig("spectrum interval must be positive".into()));
        }

        let sink: Arc<dyn SpectrumSink> = self.inner.clone();
        let started = self
            .inner
            .sampler
            .start(&self.inner.runtime, period, Arc::downgrade(&sink));
        if started {
            self.inner.commit(StateUpdate {
                analysis_enabled: Some(true),
                ..Default::default()
            });
        }
        Ok(started)
    }

    /// Stop sampling and clear the last snapshot; `false` if not running
    pub fn stop_spectrum_analysis(&self) -> bool {
        if !self.inner.sampler.stop() {
            return false;
        }
        if !self.inner.is_disposed() {
            self.inner.commit(StateUpdate {
                analysis_enabled: Some(false),
                spectrum_data: Some(None),
                ..Default::default()
            });
        }
        true
    }

    pub fn is_analysing(&self) -> bool {
        self.inner.sampler.is_running()
    }

    // ========================================================================
    // Export / import
    // ========================================================================

    pub fn export_configuration(&self) -> EqualiserConfig {
        let state = self.inner.state.lock();
        EqualiserConfig {
            bands: state.bands.clone(),
            preset: state.current_preset.clone(),
            enabled: state.enabled,
            output_gain: state.output_gain,
            input_gain: state.input_gain,
            quality: Quality::High,
            oversampling_rate: OversamplingRate::X2,
        }
    }

    /// Replay an exported configuration inside one batch
    ///
    /// Bands are matched by frequency; active bands with no exported
    /// counterpart keep their gain.
    pub fn import_configuration(&self, config: &EqualiserConfig) -> EqResult<()> {
        self.ensure_live()?;
        let batch = self.begin_batch();

        batch.set_enabled(config.enabled)?;
        batch.set_input_gain(config.input_gain)?;
        batch.set_output_gain(config.output_gain)?;

        let matched: Vec<(String, f32)> = self
            .inner
            .state
            .lock()
            .bands
            .iter()
            .take(self.inner.config.native_band_limit)
            .filter_map(|band| {
                config
                    .bands
                    .iter()
                    .find(|exported| (exported.frequency - band.frequency).abs() < FREQUENCY_MATCH_TOLERANCE)
                    .map(|exported| (band.id.clone(), exported.gain))
            })
            .collect();
        for (band_id, gain) in &matched {
            batch.set_band_gain(band_id, *gain)?;
        }

        if let Some(preset) = &config.preset {
            batch.set_current_preset(Some(preset.clone()))?;
        }

        info!(bands = matched.len(), "configuration imported");
        batch.end();
        Ok(())
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Stop background work and drop all listeners
    ///
    /// Later mutations fail with [`EqError::Disposed`]. Calling twice is a
    /// no-op.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.inner.sampler.stop();
        self.inner.applier.cancel_all();
        self.inner.bus.clear();
        info!("equaliser disposed");
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn ensure_live(&self) -> EqResult<()> {
        if self.inner.is_disposed() {
            return Err(EqError::Disposed);
        }
        Ok(())
    }

    /// Report invalid input on both channels: the error event and `Err`
    fn fail<T>(&self, error: EqError) -> EqResult<T> {
        warn!(error = %error, "equaliser call rejected");
        self.inner.bus.emit::<ErrorEvent>(&error);
        Err(error)
    }

    fn clamp_band(&self, gain: f32) -> f32 {
        clamp_gain(gain, self.inner.config.min_gain, self.inner.config.max_gain)
    }

    fn clamp_master(&self, gain: f32) -> f32 {
        let limit = self.inner.config.master_gain_limit;
        clamp_gain(gain, -limit, limit)
    }
}
