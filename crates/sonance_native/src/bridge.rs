//! Fail-Safe Native Bridge
//!
//! Every native call goes through `guard`, which catches both returned
//! errors and panics and substitutes a documented default:
//!
//! | Return kind      | Default        |
//! |------------------|----------------|
//! | unit (`set_*`)   | `false`        |
//! | `bool`           | `false`        |
//! | `f32`            | `0.0`          |
//! | current preset   | `"Flat"`       |
//! | preset names     | empty          |
//! | spectrum frame   | `None`         |
//!
//! Unit calls report success as `bool` so callers that care can tell a no-op
//! from an applied change. Nothing here ever panics or returns `Err`.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{trace, warn};

use crate::error::{NativeError, NativeResult};
use crate::null::NullEngine;
use crate::traits::NativeEngine;

/// Name reported when the engine cannot tell us its current preset
pub const DEFAULT_PRESET_NAME: &str = "Flat";

/// Cheap-to-clone handle around a shared native engine
#[derive(Clone)]
pub struct NativeBridge {
    engine: Arc<dyn NativeEngine>,
}

impl std::fmt::Debug for NativeBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeBridge")
            .field("engine", &self.engine_name())
            .finish()
    }
}

impl Default for NativeBridge {
    fn default() -> Self {
        Self::null()
    }
}

impl NativeBridge {
    /// Wrap an engine
    pub fn new<E: NativeEngine + 'static>(engine: E) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Wrap an engine that is also held elsewhere (tests keep a handle to
    /// inspect it)
    pub fn from_shared(engine: Arc<dyn NativeEngine>) -> Self {
        Self { engine }
    }

    /// Bridge with no native support at all
    pub fn null() -> Self {
        Self::new(NullEngine::new())
    }

    /// Engine name, or `"unknown"` if even that call panics
    pub fn engine_name(&self) -> &'static str {
        catch_unwind(AssertUnwindSafe(|| self.engine.name())).unwrap_or("unknown")
    }

    /// Run one native call, absorbing errors and panics
    fn guard<T>(
        &self,
        method: &'static str,
        default: T,
        call: impl FnOnce(&dyn NativeEngine) -> NativeResult<T>,
    ) -> T {
        match catch_unwind(AssertUnwindSafe(|| call(self.engine.as_ref()))) {
            Ok(Ok(value)) => value,
            Ok(Err(NativeError::Unsupported(_))) => {
                trace!(method, "native method unsupported, using default");
                default
            }
            Ok(Err(e)) => {
                warn!(method, error = %e, "native call failed, using default");
                default
            }
            Err(_) => {
                warn!(method, "native call panicked, using default");
                default
            }
        }
    }

    /// Unit calls: `true` when the engine accepted the call
    fn guard_unit(&self, method: &'static str, call: impl FnOnce(&dyn NativeEngine) -> NativeResult<()>) -> bool {
        self.guard(method, false, |engine| call(engine).map(|()| true))
    }

    /// Numeric reads: non-finite values are treated like failures
    fn guard_number(&self, method: &'static str, call: impl FnOnce(&dyn NativeEngine) -> NativeResult<f32>) -> f32 {
        let value = self.guard(method, 0.0, call);
        if value.is_finite() {
            value
        } else {
            warn!(method, value, "native returned non-finite value");
            0.0
        }
    }

    pub fn set_enabled(&self, enabled: bool) -> bool {
        self.guard_unit("set_enabled", |e| e.set_enabled(enabled))
    }

    pub fn is_enabled(&self) -> bool {
        self.guard("enabled", false, |e| e.enabled())
    }

    pub fn set_band_gain(&self, index: usize, gain_db: f32) -> bool {
        self.guard_unit("set_band_gain", |e| e.set_band_gain(index, gain_db))
    }

    pub fn band_gain(&self, index: usize) -> f32 {
        self.guard_number("band_gain", |e| e.band_gain(index))
    }

    pub fn master_gain(&self) -> f32 {
        self.guard_number("master_gain", |e| e.master_gain())
    }

    pub fn set_master_gain(&self, gain_db: f32) -> bool {
        self.guard_unit("set_master_gain", |e| e.set_master_gain(gain_db))
    }

    pub fn set_preset(&self, name: &str) -> bool {
        self.guard_unit("set_preset", |e| e.set_preset(name))
    }

    /// Current native preset name; `"Flat"` when unknown or empty
    pub fn current_preset(&self) -> String {
        let name = self.guard("current_preset", String::new(), |e| e.current_preset());
        if name.is_empty() {
            DEFAULT_PRESET_NAME.to_string()
        } else {
            name
        }
    }

    pub fn available_presets(&self) -> Vec<String> {
        self.guard("available_presets", Vec::new(), |e| e.available_presets())
    }

    pub fn begin_batch(&self) -> bool {
        self.guard_unit("begin_batch", |e| e.begin_batch())
    }

    pub fn end_batch(&self) -> bool {
        self.guard_unit("end_batch", |e| e.end_batch())
    }

    pub fn start_spectrum_analysis(&self) -> bool {
        self.guard_unit("start_spectrum_analysis", |e| e.start_spectrum_analysis())
    }

    pub fn stop_spectrum_analysis(&self) -> bool {
        self.guard_unit("stop_spectrum_analysis", |e| e.stop_spectrum_analysis())
    }

    pub fn spectrum_data(&self) -> Option<Vec<f32>> {
        self.guard("spectrum_data", None, |e| e.spectrum_data())
    }
}
