//! DSP Error Types

use thiserror::Error;

/// Errors raised while validating band layouts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("Band layout must contain at least one band")]
    EmptyLayout,

    #[error("Duplicate band id in layout: {0}")]
    DuplicateBandId(String),

    #[error("Invalid frequency {frequency}Hz for band {id}")]
    InvalidFrequency { id: String, frequency: f32 },

    #[error("Invalid Q {q} for band {id}")]
    InvalidQ { id: String, q: f32 },
}
