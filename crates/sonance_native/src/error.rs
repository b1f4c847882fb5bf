//! Native Error Types

use thiserror::Error;

/// Errors reported by a native engine implementation
///
/// These never leave `NativeBridge`; they only decide which default it
/// returns and how loudly it logs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NativeError {
    #[error("Native method not supported by this build: {0}")]
    Unsupported(&'static str),

    #[error("Native call {method} failed: {message}")]
    CallFailed {
        method: &'static str,
        message: String,
    },

    #[error("Band index out of range: {index} (engine has {bands} bands)")]
    BandOutOfRange { index: usize, bands: usize },
}

/// Result type alias for native engine calls
pub type NativeResult<T> = Result<T, NativeError>;
