//! # Visusort
//!
//! Watch sorting algorithms run as animated bars in the terminal.
//!
//! Every element access an algorithm makes through an [`InstrumentedArray`]
//! kicks off a short highlight-and-redraw of the touched bar on a background
//! worker, so the algorithm code reads like ordinary sorting code while the
//! screen shows every step.
//!
//! ## Core Concepts
//!
//! - **Instrumented access**: `access`, `get`, `set`, `swap` each schedule one
//!   render job; raw reads and bulk views do not
//! - **One worker at a time**: a new job joins the previous one first, so jobs
//!   finish in the order their accesses were issued
//! - **Continuous animator**: for routines that cannot be instrumented per
//!   element, a worker sweeps the whole sequence until stopped
//! - **Undo history**: whole-sequence snapshots in a bounded ring
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use visusort::{algo, BarRenderer, InstrumentedArray, MemorySurface, Pacing};
//!
//! let surface = visusort::surface::share(MemorySurface::new(40, 12));
//! let mut array = InstrumentedArray::new(
//!     vec![5, 3, 8, 1],
//!     surface,
//!     Arc::new(BarRenderer::new()),
//!     Arc::new(Pacing::instant()),
//! );
//! algo::insertion_sort(&mut array)?;
//! array.join()?;
//! assert_eq!(array.snapshot(), vec![1, 3, 5, 8]);
//! # Ok::<(), visusort::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod algo;
pub mod app;
pub mod array;
pub mod config;
pub mod data;
pub mod error;
pub mod history;
pub mod render;
pub mod surface;

// Re-exports for convenience
pub use algo::{Algorithm, SortStats};
pub use app::{App, Command, Flow};
pub use array::{InstrumentedArray, Pacing, RenderStats, Value};
pub use config::Config;
pub use data::Fill;
pub use error::{Error, Result};
pub use history::HistoryRing;
pub use render::{BarRenderer, Renderer};
pub use surface::{AnsiSurface, MemorySurface, Surface, TerminalSession, Tone};
