//! `InstrumentedArray`: the sequence wrapper every algorithm goes through.
//!
//! # Synchronization
//!
//! The caller thread is the only writer. The render worker only reads the
//! sequence, at draw time, through the shared `RwLock`. At most one worker
//! exists: every operation that starts one first joins the previous one,
//! so render jobs complete strictly in the order their accesses were
//! issued.
//!
//! ```text
//! access(i1) ──join──spawn(job i1)──▶ return &mut data[i1]
//! access(i2) ──join(job i1)──spawn(job i2)──▶ return &mut data[i2]
//! ```

use super::pacing::Pacing;
use super::worker::{RenderContext, RenderStats, StatsRecorder, Worker};
use super::Value;
use crate::error::{Error, Result};
use crate::render::Renderer;
use crate::surface::{SharedSurface, Tone};
use log::debug;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Live mutable reference to one element.
///
/// Holds the sequence's write lock; a worker that wants to draw waits
/// until this guard is dropped.
pub struct ElementMut<'a> {
    guard: RwLockWriteGuard<'a, Vec<Value>>,
    index: usize,
}

impl Deref for ElementMut<'_> {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.guard[self.index]
    }
}

impl DerefMut for ElementMut<'_> {
    fn deref_mut(&mut self) -> &mut Value {
        &mut self.guard[self.index]
    }
}

/// Zero-copy read-only view of the whole sequence.
pub struct SequenceView<'a>(RwLockReadGuard<'a, Vec<Value>>);

impl Deref for SequenceView<'_> {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

/// Zero-copy mutable view of the whole sequence, for library sorts.
pub struct SequenceViewMut<'a>(RwLockWriteGuard<'a, Vec<Value>>);

impl Deref for SequenceViewMut<'_> {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl DerefMut for SequenceViewMut<'_> {
    fn deref_mut(&mut self) -> &mut [Value] {
        &mut self.0
    }
}

/// A sequence of bar heights whose element accesses animate themselves.
pub struct InstrumentedArray {
    ctx: RenderContext,
    /// The in-flight worker, if any.
    worker: Option<Worker>,
}

impl InstrumentedArray {
    /// Wrap `values`, drawing through `renderer` onto `surface`.
    pub fn new(
        values: Vec<Value>,
        surface: SharedSurface,
        renderer: Arc<dyn Renderer>,
        pacing: Arc<Pacing>,
    ) -> Self {
        Self {
            ctx: RenderContext {
                data: Arc::new(RwLock::new(values)),
                surface,
                renderer,
                pacing,
                stats: Arc::new(StatsRecorder::default()),
            },
            worker: None,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.ctx.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Value>> {
        self.ctx.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_index(&self, index: usize) {
        let len = self.len();
        assert!(index < len, "index {index} out of range for sequence of length {len}");
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Uninstrumented read. Never spawns a job.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn read_raw(&self, index: usize) -> Value {
        self.read()[index]
    }

    /// Uninstrumented write access. Never spawns a job.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn write_raw(&mut self, index: usize) -> ElementMut<'_> {
        self.check_index(index);
        ElementMut {
            guard: self.write(),
            index,
        }
    }

    /// Instrumented access.
    ///
    /// Joins the previous render job, starts a new one highlighting
    /// `index`, and returns a live reference without waiting for it. The
    /// write lock is taken before the job starts, so the job cannot draw
    /// until the reference is released and then shows whatever the element
    /// holds.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn access(&mut self, index: usize) -> Result<ElementMut<'_>> {
        self.check_index(index);
        self.join()?;

        let guard = self.ctx.data.write().unwrap_or_else(PoisonError::into_inner);
        self.ctx.stats.access();
        let worker = Worker::spawn_job(self.ctx.clone(), index).map_err(Error::Spawn)?;
        self.worker = Some(worker);

        Ok(ElementMut { guard, index })
    }

    /// Instrumented read.
    pub fn get(&mut self, index: usize) -> Result<Value> {
        Ok(*self.access(index)?)
    }

    /// Instrumented write.
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        *self.access(index)? = value;
        Ok(())
    }

    /// Instrumented swap: reads both elements, then writes both.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let left = self.get(a)?;
        let right = self.get(b)?;
        self.set(a, right)?;
        self.set(b, left)
    }

    /// Wait for the in-flight worker, if any.
    ///
    /// An animator session is asked to stop first, so it finishes with its
    /// final sweep instead of blocking forever.
    pub fn join(&mut self) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        if worker.is_animator() {
            debug!("join stops the running animator");
            worker.request_stop();
        }
        worker.join().map_err(|_| Error::WorkerPanicked)
    }

    /// Synchronously highlight `index` in `tone` without using the worker slot.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn hot_point(&mut self, index: usize, tone: Tone) -> Result<()> {
        self.check_index(index);
        self.join()?;
        self.ctx.draw_point(index, tone);
        Ok(())
    }

    /// Synchronously redraw every bar in `tone`.
    pub fn redraw(&mut self, tone: Tone) -> Result<()> {
        self.join()?;
        self.ctx.redraw(tone)?;
        Ok(())
    }

    /// Read-only view of the whole sequence. Does not join.
    pub fn as_sequence(&self) -> SequenceView<'_> {
        SequenceView(self.read())
    }

    /// Mutable contiguous view for comparison sorts that cannot be
    /// instrumented per element. Does not join; wrap its use in
    /// [`start_render`](Self::start_render) / [`stop_render`](Self::stop_render).
    pub fn as_sequence_mut(&mut self) -> SequenceViewMut<'_> {
        SequenceViewMut(self.write())
    }

    /// Owned copy of the sequence.
    pub fn snapshot(&self) -> Vec<Value> {
        self.read().clone()
    }

    /// Overwrite every element with `values` through raw writes.
    ///
    /// Does not join, so a running animator shows the transition.
    ///
    /// # Panics
    ///
    /// Panics if `values` has a different length.
    pub fn restore(&mut self, values: &[Value]) {
        assert_eq!(values.len(), self.len(), "restore must keep the sequence length");
        for (index, &value) in values.iter().enumerate() {
            *self.write_raw(index) = value;
        }
    }

    /// Swap in a new sequence, possibly of another length. Joins first.
    pub fn replace(&mut self, values: Vec<Value>) -> Result<()> {
        self.join()?;
        *self.write() = values;
        Ok(())
    }

    /// Start the continuous animator.
    pub fn start_render(&mut self) -> Result<()> {
        self.join()?;
        debug!("starting continuous animator over {} elements", self.len());
        let worker = Worker::spawn_animator(self.ctx.clone()).map_err(Error::Spawn)?;
        self.worker = Some(worker);
        Ok(())
    }

    /// Stop the continuous animator and wait for its final frame.
    pub fn stop_render(&mut self) -> Result<()> {
        if let Some(worker) = &self.worker {
            worker.request_stop();
        }
        self.join()
    }

    /// Whether a continuous animator session is running.
    pub fn is_animating(&self) -> bool {
        self.worker.as_ref().is_some_and(Worker::is_animator)
    }

    /// Current render counters.
    pub fn stats(&self) -> RenderStats {
        self.ctx.stats.snapshot()
    }

    /// Animation delays, adjustable at any time.
    pub const fn pacing(&self) -> &Arc<Pacing> {
        &self.ctx.pacing
    }
}

impl std::fmt::Debug for InstrumentedArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstrumentedArray")
            .field("len", &self.len())
            .field("worker", &self.worker.is_some())
            .field("animating", &self.is_animating())
            .finish()
    }
}
