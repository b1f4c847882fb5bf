//! Batch Applier
//!
//! Pushes a full set of band gains to the native engine in small chunks,
//! yielding to the scheduler between chunks so the UI side keeps running.
//!
//! ```text
//! issue() ──▶ (task_id, token)      previous token cancelled
//!    │
//!    ▼
//! begin hint ─▶ [write write write] ─yield─▶ [write write write] ─yield─▶ ... ─▶ end hint
//!                 │                            │
//!                 └─ each write: lock gate, check token, look up gain, call native
//! ```
//!
//! Every native write happens under the gate after re-checking the task's
//! token, and `issue()` cancels the previous token under the same gate. Once
//! a newer task has been issued the older one cannot make another native
//! call, whatever the runtime flavour.
//!
//! A task does not replay the gains it was planned with. Each write asks the
//! caller for the band's gain at that moment, so edits made while the task
//! runs (a solo, a restored band) are what reaches native. Writes made
//! outside the task through [`BatchApplier::write_pinned`] pin their band and
//! the task skips it from then on.

use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use sonance_native::NativeBridge;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace};

/// Cancellation flag shared between an apply task and whoever issued it
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How an apply task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Every write was issued and the end hint sent
    Completed,
    /// Superseded or cancelled before finishing
    Cancelled,
    /// An internal failure aborted the task (reported on the error event)
    Failed,
}

/// One planned native band gain write
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandWrite {
    pub index: usize,
    pub gain: f32,
}

/// Handle to a spawned apply task
#[derive(Debug)]
pub struct ApplyHandle {
    task_id: u64,
    token: CancelToken,
    join: JoinHandle<ApplyOutcome>,
}

impl ApplyHandle {
    pub(crate) fn new(task_id: u64, token: CancelToken, join: JoinHandle<ApplyOutcome>) -> Self {
        Self { task_id, token, join }
    }

    pub fn task_id(&self) -> u64 {
        self.task_id
    }

    /// Stop the task at its next write
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the task to end
    pub async fn wait(self) -> ApplyOutcome {
        match self.join.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => ApplyOutcome::Cancelled,
            Err(_) => ApplyOutcome::Failed,
        }
    }
}

#[derive(Debug, Default)]
struct ApplySlot {
    issued: u64,
    current: Option<CancelToken>,
    /// Bands written outside the current task since it was issued
    pinned: BTreeSet<usize>,
}

/// Chunked, cancellable band writer
#[derive(Debug, Clone)]
pub struct BatchApplier {
    bridge: NativeBridge,
    chunk_size: usize,
    gate: Arc<Mutex<ApplySlot>>,
}

impl BatchApplier {
    pub fn new(bridge: NativeBridge, chunk_size: usize) -> Self {
        Self {
            bridge,
            chunk_size: chunk_size.max(1),
            gate: Arc::new(Mutex::new(ApplySlot::default())),
        }
    }

    /// Start a new task, superseding whichever one is in flight
    pub fn issue(&self) -> (u64, CancelToken) {
        let mut slot = self.gate.lock();
        if let Some(previous) = slot.current.take() {
            previous.cancel();
        }
        slot.issued += 1;
        slot.pinned.clear();
        let token = CancelToken::new();
        slot.current = Some(token.clone());
        (slot.issued, token)
    }

    /// Cancel the in-flight task, if any
    pub fn cancel_all(&self) {
        if let Some(current) = self.gate.lock().current.take() {
            current.cancel();
        }
    }

    /// Id of the most recently issued task (0 before the first)
    pub fn latest_task_id(&self) -> u64 {
        self.gate.lock().issued
    }

    /// Write one band now, serialized with task writes
    ///
    /// The band is pinned: the in-flight task leaves it alone until the next
    /// `issue()`. Returns whether native accepted the write.
    pub fn write_pinned(&self, write: BandWrite) -> bool {
        let mut slot = self.gate.lock();
        slot.pinned.insert(write.index);
        self.bridge.set_band_gain(write.index, write.gain)
    }

    /// Write every band in `indices` with the gain `current` reports, all
    /// under one hold of the gate
    ///
    /// Bands are not pinned; a running task keeps looking up their gain.
    pub fn write_current<F>(&self, indices: &[usize], current: F)
    where
        F: Fn(usize) -> Option<f32>,
    {
        let _gate = self.gate.lock();
        for &index in indices {
            if let Some(gain) = current(index) {
                self.bridge.set_band_gain(index, gain);
            }
        }
    }

    /// Write `writes` in order, yielding after every chunk
    ///
    /// `current` gives the gain to send for a write at the moment it is
    /// made; `None` skips that band. Native failures are absorbed by the
    /// bridge and do not affect the outcome. Partial application is visible
    /// natively while the task runs.
    pub async fn apply_bands<F>(&self, writes: Vec<BandWrite>, task_id: u64, token: CancelToken, current: F) -> ApplyOutcome
    where
        F: Fn(&BandWrite) -> Option<f32>,
    {
        if token.is_cancelled() {
            debug!(task_id, "apply task cancelled before start");
            return ApplyOutcome::Cancelled;
        }

        self.bridge.begin_batch();

        for (n, chunk) in writes.chunks(self.chunk_size).enumerate() {
            if n > 0 {
                tokio::task::yield_now().await;
            }

            let written = catch_unwind(AssertUnwindSafe(|| {
                chunk.iter().all(|write| self.write(write, &token, &current))
            }));
            match written {
                Ok(true) => {}
                Ok(false) => {
                    debug!(task_id, "apply task superseded");
                    return ApplyOutcome::Cancelled;
                }
                Err(_) => {
                    error!(task_id, "apply task panicked");
                    return ApplyOutcome::Failed;
                }
            }
        }

        self.bridge.end_batch();
        debug!(task_id, bands = writes.len(), "apply task completed");
        ApplyOutcome::Completed
    }

    /// Returns `false` without writing once the token is cancelled
    fn write<F>(&self, write: &BandWrite, token: &CancelToken, current: &F) -> bool
    where
        F: Fn(&BandWrite) -> Option<f32>,
    {
        let slot = self.gate.lock();
        if token.is_cancelled() {
            return false;
        }
        if slot.pinned.contains(&write.index) {
            trace!(index = write.index, "band pinned, skipping planned write");
            return true;
        }
        if let Some(gain) = current(write) {
            self.bridge.set_band_gain(write.index, gain);
        }
        true
    }
}
