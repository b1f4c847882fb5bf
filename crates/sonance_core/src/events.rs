//! Typed Event Bus
//!
//! Each event is a marker type implementing [`Event`], which fixes its
//! payload type at compile time:
//!
//! ```text
//! StateChanged   ──▶ EqualiserState
//! BandChanged    ──▶ BandChange
//! PresetChanged  ──▶ Option<String>
//! EnabledChanged ──▶ bool
//! BypassChanged  ──▶ bool
//! SpectrumData   ──▶ SpectrumSnapshot
//! ErrorEvent     ──▶ EqError
//! ```
//!
//! Listeners run in registration order, each inside its own `catch_unwind`:
//! a panicking listener is logged and skipped, its siblings still run and
//! the emitter never sees the panic. The listener list is snapshotted before
//! dispatch, so listeners may subscribe, unsubscribe or emit re-entrantly.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sonance_dsp::SpectrumSnapshot;
use tracing::warn;

use crate::error::EqError;
use crate::state::EqualiserState;

mod sealed {
    pub trait Sealed {}
}

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// An event name bound to its payload type
pub trait Event: sealed::Sealed + Send + Sync + 'static {
    type Payload: Send + Sync + 'static;

    /// Name used in logs
    const NAME: &'static str;

    #[doc(hidden)]
    fn listeners(bus: &EventBus) -> &Arc<ListenerSet<Self::Payload>>;
}

/// Payload of [`BandChanged`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandChange {
    pub band_id: String,
    pub gain: f32,
    /// Set when the change carried a new center frequency
    pub frequency: Option<f32>,
    /// Set when the change carried a new Q
    pub q: Option<f32>,
}

impl BandChange {
    pub fn gain(band_id: impl Into<String>, gain: f32) -> Self {
        Self {
            band_id: band_id.into(),
            gain,
            frequency: None,
            q: None,
        }
    }
}

/// Listeners registered for one event
#[doc(hidden)]
pub struct ListenerSet<T> {
    entries: Mutex<Vec<(u64, Listener<T>)>>,
}

impl<T> Default for ListenerSet<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl<T> ListenerSet<T> {
    fn push(&self, id: u64, listener: Listener<T>) {
        self.entries.lock().push((id, listener));
    }

    fn remove(&self, id: u64) {
        self.entries.lock().retain(|(entry_id, _)| *entry_id != id);
    }

    fn snapshot(&self) -> Vec<Listener<T>> {
        self.entries.lock().iter().map(|(_, l)| Arc::clone(l)).collect()
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}

macro_rules! events {
    ($( $(#[$meta:meta])* $marker:ident => $field:ident: $payload:ty = $name:literal; )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $marker;

            impl sealed::Sealed for $marker {}

            impl Event for $marker {
                type Payload = $payload;
                const NAME: &'static str = $name;

                fn listeners(bus: &EventBus) -> &Arc<ListenerSet<$payload>> {
                    &bus.$field
                }
            }
        )*

        /// Publish/subscribe hub shared by the coordinator and its tasks
        pub struct EventBus {
            next_id: AtomicU64,
            $( $field: Arc<ListenerSet<$payload>>, )*
        }

        impl Default for EventBus {
            fn default() -> Self {
                Self {
                    next_id: AtomicU64::new(1),
                    $( $field: Arc::default(), )*
                }
            }
        }

        impl EventBus {
            /// Drop every listener of every event
            pub fn clear(&self) {
                $( self.$field.clear(); )*
            }
        }
    };
}

events! {
    /// Full state after every committed mutation
    StateChanged => state_changed: EqualiserState = "stateChanged";
    /// A single band's gain or parameters changed
    BandChanged => band_changed: BandChange = "bandChanged";
    /// Preset selected; `None` never fires here, manual edits only show in state
    PresetChanged => preset_changed: Option<String> = "presetChanged";
    EnabledChanged => enabled_changed: bool = "enabledChanged";
    BypassChanged => bypass_changed: bool = "bypassChanged";
    /// A new spectrum frame was sampled
    SpectrumData => spectrum_data: SpectrumSnapshot = "spectrumData";
    /// Invalid input or an internal failure in a background task
    ErrorEvent => error: EqError = "error";
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("state_changed", &self.listener_count::<StateChanged>())
            .field("error", &self.listener_count::<ErrorEvent>())
            .finish_non_exhaustive()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered until unsubscribed or cleared
    pub fn on<E, F>(&self, listener: F) -> Subscription
    where
        E: Event,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let set = E::listeners(self);
        set.push(id, Arc::new(listener));

        let weak: Weak<ListenerSet<E::Payload>> = Arc::downgrade(set);
        Subscription {
            event: E::NAME,
            detach: Some(Box::new(move || {
                if let Some(set) = weak.upgrade() {
                    set.remove(id);
                }
            })),
        }
    }

    /// Call every listener of `E` in registration order
    pub fn emit<E: Event>(&self, payload: &E::Payload) {
        for listener in E::listeners(self).snapshot() {
            if catch_unwind(AssertUnwindSafe(|| listener(payload))).is_err() {
                warn!(event = E::NAME, "event listener panicked");
            }
        }
    }

    pub fn listener_count<E: Event>(&self) -> usize {
        E::listeners(self).len()
    }
}

/// Handle returned by [`EventBus::on`]
///
/// Dropping it leaves the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
pub struct Subscription {
    event: &'static str,
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Name of the event this subscription listens to
    pub fn event(&self) -> &'static str {
        self.event
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("event", &self.event).finish()
    }
}
