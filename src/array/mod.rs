//! Instrumented Array: the animated sequence and its render worker.
//!
//! This module contains:
//! - [`InstrumentedArray`]: access wrapper that schedules one redraw per access
//! - [`Pacing`]: runtime-adjustable animation delays
//! - [`RenderStats`]: counters for accesses, jobs, sweeps, and flushes
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  access(i)   ┌───────────────────┐  spawn   ┌──────────────┐
//! │  Algorithm   │ ───────────▶ │ InstrumentedArray │ ───────▶ │ Render Worker│
//! │ (caller thr) │ ◀─────────── │  join-before-spawn│          │ (read-only)  │
//! └──────────────┘  &mut value  └───────────────────┘          └──────────────┘
//!                                        │                            │
//!                                        └────── Arc<RwLock<Vec>> ────┘
//! ```

mod instrumented;
mod pacing;
mod worker;

pub use instrumented::{ElementMut, InstrumentedArray, SequenceView, SequenceViewMut};
pub use pacing::Pacing;
pub use worker::RenderStats;

/// A bar height.
pub type Value = i32;
