//! Coordinator Error Types

use thiserror::Error;

/// Errors that can occur in the equaliser coordinator
///
/// Native failures never show up here; `NativeBridge` absorbs them. What
/// remains is caller error (unknown ids, bad config) and internal failures
/// of background tasks, which are delivered through the `error` event.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EqError {
    #[error("Band not found: {0}")]
    BandNotFound(String),

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("No tokio runtime available - create the equaliser inside a runtime")]
    NoRuntime,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Equaliser has been disposed")]
    Disposed,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("DSP error: {0}")]
    Dsp(#[from] sonance_dsp::DspError),
}

/// Result type alias for coordinator operations
pub type EqResult<T> = Result<T, EqError>;
