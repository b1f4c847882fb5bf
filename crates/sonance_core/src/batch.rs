//! Batch Transactions
//!
//! A [`Batch`] buffers state mutations and commits them as one update, so
//! listeners see a single `stateChanged` however many edits it held.
//!
//! ```text
//! root batch ──end──▶ one stateChanged (if anything was buffered)
//!   └─ nested ──end──▶ merged into the root's buffer, nothing emitted
//! ```
//!
//! Each batch owns its buffer, so independent batches can be open at the
//! same time. Native batch hints are depth-counted across all open batches.
//! Native calls and non-state events happen at call time; only the
//! `stateChanged` emission is deferred.

use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::equaliser::{Equaliser, Scope};
use crate::error::EqResult;
use crate::state::StateUpdate;

#[derive(Debug, Default)]
pub(crate) struct BatchBuffer {
    pub(crate) update: StateUpdate,
    pub(crate) parent: Option<Arc<Mutex<BatchBuffer>>>,
    closed: bool,
}

/// Open batch; commits on [`end`](Self::end) or drop
#[derive(Debug)]
pub struct Batch {
    owner: Equaliser,
    buffer: Arc<Mutex<BatchBuffer>>,
    open: bool,
}

impl Batch {
    pub(crate) fn open(owner: Equaliser, parent: Option<Arc<Mutex<BatchBuffer>>>) -> Self {
        owner.enter_native_batch();
        Self {
            owner,
            buffer: Arc::new(Mutex::new(BatchBuffer {
                parent,
                ..Default::default()
            })),
            open: true,
        }
    }

    fn scope(&self) -> Scope<'_> {
        Scope::Batched(&self.buffer)
    }

    /// Open a batch whose buffer merges into this one when it ends
    pub fn begin_nested(&self) -> Batch {
        Batch::open(self.owner.clone(), Some(Arc::clone(&self.buffer)))
    }

    pub fn set_enabled(&self, enabled: bool) -> EqResult<()> {
        self.owner.apply_enabled(self.scope(), enabled)
    }

    pub fn set_bypass(&self, bypassed: bool) -> EqResult<()> {
        self.owner.apply_bypass(self.scope(), bypassed)
    }

    /// Buffered band edit; does not clear the current preset
    pub fn set_band_gain(&self, band_id: &str, gain: f32) -> EqResult<()> {
        self.owner.apply_band_gain(self.scope(), band_id, gain)
    }

    pub fn set_input_gain(&self, gain: f32) -> EqResult<()> {
        self.owner.apply_input_gain(self.scope(), gain)
    }

    pub fn set_output_gain(&self, gain: f32) -> EqResult<()> {
        self.owner.apply_output_gain(self.scope(), gain)
    }

    pub fn set_current_preset(&self, preset: Option<String>) -> EqResult<()> {
        self.owner.apply_current_preset(self.scope(), preset)
    }

    /// Nothing buffered yet
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().update.is_empty()
    }

    /// Commit the batch
    pub fn end(mut self) {
        self.commit();
    }

    fn commit(&mut self) {
        if !mem::replace(&mut self.open, false) {
            return;
        }

        let (update, parent) = {
            let mut buffer = self.buffer.lock();
            buffer.closed = true;
            (mem::take(&mut buffer.update), buffer.parent.take())
        };

        self.owner.leave_native_batch();

        let update = match &parent {
            Some(parent) => {
                let mut parent = parent.lock();
                if !parent.closed {
                    parent.update.merge(update);
                    return;
                }
                warn!("nested batch outlived its parent, committing directly");
                update
            }
            None => update,
        };

        if update.is_empty() {
            debug!("empty batch, nothing to commit");
            return;
        }
        self.owner.commit_batch(update);
    }
}

impl Drop for Batch {
    fn drop(&mut self) {
        self.commit();
    }
}
