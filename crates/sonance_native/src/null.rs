//! Null Engine
//!
//! Used when the build target has no native EQ. Required methods report
//! `Unsupported` as well, so the bridge answers every call with its default.

use crate::error::{NativeError, NativeResult};
use crate::traits::NativeEngine;

/// Engine that supports nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEngine;

impl NullEngine {
    pub fn new() -> Self {
        Self
    }
}

impl NativeEngine for NullEngine {
    fn name(&self) -> &'static str {
        "Null (no native EQ)"
    }

    fn set_enabled(&self, _enabled: bool) -> NativeResult<()> {
        Err(NativeError::Unsupported("set_enabled"))
    }

    fn set_band_gain(&self, _index: usize, _gain_db: f32) -> NativeResult<()> {
        Err(NativeError::Unsupported("set_band_gain"))
    }

    fn band_gain(&self, _index: usize) -> NativeResult<f32> {
        Err(NativeError::Unsupported("band_gain"))
    }
}
