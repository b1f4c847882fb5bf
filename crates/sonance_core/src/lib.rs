//! Sonance Core - Equaliser Coordinator
//!
//! This crate sits between a UI layer and a native parametric EQ engine:
//! - Canonical EQ state (bands, gains, presets, solo/bypass, spectrum)
//! - Batch transactions that coalesce mutations into one state emission
//! - Chunked, cancellable preset application on the native side
//! - Periodic spectrum sampling with peak detection
//! - A typed event bus for UI subscribers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          UI Layer                           │
//! │   set_*() / begin_batch() ──▶ Equaliser ◀── EventBus::on()  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!             ┌────────────────┼──────────────────┐
//!             ▼                ▼                  ▼
//!       BatchApplier     SpectrumSampler     state + events
//!       (tokio task)      (tokio task)
//!             │                │
//!             └───────┬────────┘
//!                     ▼
//!               NativeBridge ──▶ NativeEngine (or NullEngine)
//! ```
//!
//! Native failures stop at the bridge. Invalid input comes back as `Err`
//! and on the `error` event; failures inside background tasks only appear
//! on the `error` event.

mod applier;
mod batch;
mod config;
mod equaliser;
mod error;
mod events;
mod export;
pub mod logging;
mod sampler;
mod state;

pub use applier::{ApplyHandle, ApplyOutcome, BandWrite, BatchApplier, CancelToken};
pub use batch::Batch;
pub use config::CoordinatorConfig;
pub use equaliser::{BandParameters, Equaliser};
pub use error::{EqError, EqResult};
pub use events::{
    BandChange, BandChanged, BypassChanged, EnabledChanged, ErrorEvent, Event, EventBus, PresetChanged,
    SpectrumData, StateChanged, Subscription,
};
pub use export::{EqualiserConfig, OversamplingRate, Quality};
pub use sampler::{SpectrumProbe, SpectrumSampler, SpectrumSink};
pub use state::{EqualiserState, StateUpdate};

// Re-export the domain and native boundary types hosts need
pub use sonance_dsp::{Band, BandSpec, BandType, Preset, PresetCatalog, PresetCategory, SpectrumSnapshot};
pub use sonance_native::{MemoryEngine, NativeBridge, NativeEngine, NativeError, NullEngine};
