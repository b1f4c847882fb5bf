//! Spectrum Sampler
//!
//! Polls the native analyser on a fixed period, turns each raw frame into a
//! `SpectrumSnapshot` and hands it to a sink. The polling task holds only a
//! `Weak` reference to the sink, so it winds down on its own once the
//! coordinator is gone.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Weak;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use sonance_dsp::SpectrumSnapshot;
use sonance_native::NativeBridge;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::error::EqError;

/// Receiver of sampled frames
pub trait SpectrumSink: Send + Sync {
    fn publish(&self, snapshot: SpectrumSnapshot);

    /// A tick failed internally
    fn report(&self, error: EqError);
}

/// One-shot read of the native analyser
#[derive(Debug, Clone)]
pub struct SpectrumProbe {
    bridge: NativeBridge,
    channels: usize,
    peak_threshold: f32,
}

impl SpectrumProbe {
    pub fn new(bridge: NativeBridge, channels: usize, peak_threshold: f32) -> Self {
        Self {
            bridge,
            channels,
            peak_threshold,
        }
    }

    /// `None` when the analyser has no frame ready
    pub fn sample(&self) -> Option<SpectrumSnapshot> {
        let raw = self.bridge.spectrum_data()?;
        Some(SpectrumSnapshot::from_raw(
            &raw,
            self.channels,
            self.peak_threshold,
            Utc::now().timestamp_millis(),
        ))
    }
}

/// Periodic spectrum polling task
#[derive(Debug)]
pub struct SpectrumSampler {
    probe: SpectrumProbe,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SpectrumSampler {
    pub fn new(probe: SpectrumProbe) -> Self {
        Self {
            probe,
            task: Mutex::new(None),
        }
    }

    /// Start native analysis and the polling task
    ///
    /// Returns `false` without doing anything if already running.
    pub fn start(&self, runtime: &Handle, period: Duration, sink: Weak<dyn SpectrumSink>) -> bool {
        let mut task = self.task.lock();
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return false;
        }

        self.probe.bridge.start_spectrum_analysis();
        *task = Some(runtime.spawn(poll(self.probe.clone(), period, sink)));
        info!(period_ms = period.as_millis() as u64, "spectrum sampler started");
        true
    }

    /// Stop the polling task and native analysis
    ///
    /// Returns `false` if nothing was running.
    pub fn stop(&self) -> bool {
        let Some(task) = self.task.lock().take() else {
            return false;
        };
        task.abort();
        self.probe.bridge.stop_spectrum_analysis();
        info!("spectrum sampler stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.task.lock().as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for SpectrumSampler {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

async fn poll(probe: SpectrumProbe, period: Duration, sink: Weak<dyn SpectrumSink>) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let Some(sink) = sink.upgrade() else {
            debug!("spectrum sink dropped, sampler exiting");
            break;
        };

        let tick = catch_unwind(AssertUnwindSafe(|| {
            if let Some(snapshot) = probe.sample() {
                sink.publish(snapshot);
            }
        }));
        if tick.is_err() {
            error!("spectrum tick panicked");
            sink.report(EqError::Internal("spectrum tick panicked".into()));
        }
    }
}
