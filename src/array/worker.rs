//! Render worker: the single background thread that animates accesses.
//!
//! A [`Worker`] is a move-only handle. Dropping it requests a stop (for
//! animator sessions) and joins, so a handle can never dangle or be joined
//! twice.

use super::pacing::Pacing;
use super::Value;
use crate::render::Renderer;
use crate::surface::{self, SharedSurface, Tone};
use log::{trace, warn};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Snapshot of the engine's render counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Instrumented accesses issued.
    pub accesses: u64,
    /// Per-access render jobs spawned.
    pub jobs: u64,
    /// Completed full sweeps of the continuous animator.
    pub sweeps: u64,
    /// Surface flushes performed by workers and synchronous redraws.
    pub flushes: u64,
    /// Highest number of workers observed running at the same time.
    pub peak_workers: u64,
}

/// Shared counters behind [`RenderStats`].
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    accesses: AtomicU64,
    jobs: AtomicU64,
    sweeps: AtomicU64,
    flushes: AtomicU64,
    running: AtomicU64,
    peak_workers: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn access(&self) {
        self.accesses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a worker as running until the returned guard drops, which
    /// also happens when the worker unwinds.
    fn worker_started(&self) -> Running<'_> {
        let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_workers.fetch_max(running, Ordering::SeqCst);
        Running(self)
    }

    pub(crate) fn snapshot(&self) -> RenderStats {
        RenderStats {
            accesses: self.accesses.load(Ordering::Relaxed),
            jobs: self.jobs.load(Ordering::Relaxed),
            sweeps: self.sweeps.load(Ordering::Relaxed),
            flushes: self.flushes.load(Ordering::Relaxed),
            peak_workers: self.peak_workers.load(Ordering::SeqCst),
        }
    }
}

/// Live-worker marker; decrements the running count on drop.
struct Running<'a>(&'a StatsRecorder);

impl Drop for Running<'_> {
    fn drop(&mut self) {
        self.0.running.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Everything a worker needs to draw. Cheap to clone.
#[derive(Clone)]
pub(crate) struct RenderContext {
    pub(crate) data: Arc<RwLock<Vec<Value>>>,
    pub(crate) surface: SharedSurface,
    pub(crate) renderer: Arc<dyn Renderer>,
    pub(crate) pacing: Arc<Pacing>,
    pub(crate) stats: Arc<StatsRecorder>,
}

impl RenderContext {
    /// Flush the surface, logging instead of failing: a lost frame is
    /// repaired by the next one.
    fn flush(&self, surface: &mut dyn surface::Surface) {
        if let Err(e) = surface.flush() {
            warn!("render flush failed: {e}");
        }
        self.stats.flush();
    }

    /// Clear, wait, redraw highlighted, flush, wait.
    ///
    /// The sequence is read at draw time, not when the job was created, so
    /// the bar shows whatever the caller has written since.
    fn highlight(&self, index: usize) {
        self.renderer.clear_one(&mut *surface::lock(&self.surface), index);
        sleep(self.pacing.pre_delay());
        {
            let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
            let mut surface = surface::lock(&self.surface);
            self.renderer.draw_one(&mut *surface, &data, index, Tone::InProgress);
            self.flush(&mut *surface);
        }
        sleep(self.pacing.post_delay());
    }

    /// Synchronous full redraw in one tone.
    pub(crate) fn redraw(&self, tone: Tone) -> io::Result<()> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        let mut surface = surface::lock(&self.surface);
        self.stats.flush();
        self.renderer.draw_all(&mut *surface, &data, tone)
    }

    /// Synchronous single-bar highlight.
    pub(crate) fn draw_point(&self, index: usize, tone: Tone) {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        let mut surface = surface::lock(&self.surface);
        self.renderer.clear_one(&mut *surface, index);
        self.renderer.draw_one(&mut *surface, &data, index, tone);
        self.flush(&mut *surface);
    }

    fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

fn sleep(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}

/// Owned handle on the one running render worker.
pub(crate) struct Worker {
    handle: Option<JoinHandle<()>>,
    /// Present for animator sessions only.
    stop: Option<Arc<AtomicBool>>,
}

impl Worker {
    /// Spawn a one-shot job highlighting `index`.
    pub(crate) fn spawn_job(ctx: RenderContext, index: usize) -> io::Result<Self> {
        ctx.stats.jobs.fetch_add(1, Ordering::Relaxed);
        let handle = Self::builder().spawn(move || {
            let _running = ctx.stats.worker_started();
            trace!("render job for index {index}");
            ctx.highlight(index);
        })?;

        Ok(Self {
            handle: Some(handle),
            stop: None,
        })
    }

    /// Spawn a continuous animator that sweeps until stopped.
    pub(crate) fn spawn_animator(ctx: RenderContext) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = stop.clone();

        let handle = Self::builder().spawn(move || {
            let _running = ctx.stats.worker_started();
            Self::run_animator(&ctx, &stop_clone);
        })?;

        Ok(Self {
            handle: Some(handle),
            stop: Some(stop),
        })
    }

    fn builder() -> thread::Builder {
        thread::Builder::new().name("visusort-render".to_string())
    }

    /// Sweep loop. The flag is read at the top of each sweep; the sweep
    /// that observes it still runs to completion, then one neutral full
    /// redraw leaves the screen showing the final state.
    fn run_animator(ctx: &RenderContext, stop: &AtomicBool) {
        loop {
            let stopping = stop.load(Ordering::Acquire);

            let len = ctx.len();
            if len == 0 {
                sleep(ctx.pacing.post_delay().max(Duration::from_millis(1)));
            }
            for index in 0..len {
                ctx.highlight(index);
            }
            ctx.stats.sweeps.fetch_add(1, Ordering::Relaxed);

            if stopping {
                break;
            }
        }

        if let Err(e) = ctx.redraw(Tone::Neutral) {
            warn!("final animator frame failed: {e}");
        }
    }

    /// Whether this worker is an animator session.
    pub(crate) const fn is_animator(&self) -> bool {
        self.stop.is_some()
    }

    /// Ask an animator to finish after its current sweep. No-op for jobs.
    pub(crate) fn request_stop(&self) {
        if let Some(stop) = &self.stop {
            stop.store(true, Ordering::Release);
        }
    }

    /// Wait for the worker to finish.
    ///
    /// Animators must have been asked to stop first or this never returns.
    pub(crate) fn join(mut self) -> thread::Result<()> {
        self.handle.take().map_or(Ok(()), JoinHandle::join)
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.request_stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
