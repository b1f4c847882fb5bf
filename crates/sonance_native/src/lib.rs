//! Sonance Native - Engine Boundary
//!
//! This crate wraps the native parametric EQ engine so that the coordinator
//! never sees a native failure:
//! - `NativeEngine` trait with explicit optional methods
//! - `NativeBridge` turning every error or panic into a safe default
//! - `NullEngine` for builds without native support
//! - `MemoryEngine`, an in-process engine with a call log
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  plain values  ┌──────────────┐  Result/panic  ┌──────────────┐
//! │ Coordinator  │ ─────────────▶ │ NativeBridge │ ─────────────▶ │ NativeEngine │
//! │ (sonance_    │ ◀───────────── │  (defaults)  │ ◀───────────── │ (platform)   │
//! │  core)       │                └──────────────┘                └──────────────┘
//! └──────────────┘
//! ```

mod bridge;
mod error;
mod memory;
mod null;
mod traits;

pub use bridge::{NativeBridge, DEFAULT_PRESET_NAME};
pub use error::{NativeError, NativeResult};
pub use memory::{MemoryEngine, NativeCall};
pub use null::NullEngine;
pub use traits::NativeEngine;
