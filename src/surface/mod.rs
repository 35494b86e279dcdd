//! Terminal Surface: the character grid the renderer draws onto.
//!
//! This module contains:
//! - [`Surface`]: the narrow drawing interface the engine consumes
//! - [`AnsiSurface`]: escape-sequence output to any writer (the real terminal)
//! - [`MemorySurface`]: an in-memory grid for headless runs and tests
//! - [`TerminalSession`]: scoped raw-mode/alternate-screen acquisition
//! - [`Tone`], [`Palette`], [`Rgb`], [`Modifiers`]: display styling

mod ansi;
mod memory;
mod session;
mod style;

pub use ansi::{AnsiSurface, Geometry};
pub use memory::{Glyph, MemorySurface, SurfaceEvent};
pub use session::{SessionConfig, TerminalSession};
pub use style::{Modifiers, Palette, Rgb, Style, Tone};

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A grid of character cells that can be written to and flushed.
///
/// Coordinates are zero-based `(column, row)` with row 0 at the top.
/// Writes outside the current geometry are ignored, never errors: the
/// terminal may shrink between any two calls.
pub trait Surface: Send {
    /// Current `(width, height)` in cells.
    fn size(&self) -> (u16, u16);

    /// Write one grapheme at `(x, y)` in the given tone.
    fn put(&mut self, x: u16, y: u16, symbol: &str, tone: Tone);

    /// Blank column `x` from row `top` down to the bottom.
    fn clear_column(&mut self, x: u16, top: u16);

    /// Blank the whole surface.
    fn clear(&mut self);

    /// Make everything written so far visible.
    fn flush(&mut self) -> io::Result<()>;
}

/// A surface shared between the caller thread and the render worker.
pub type SharedSurface = Arc<Mutex<dyn Surface>>;

/// Wrap a surface for sharing with the engine.
pub fn share<S: Surface + 'static>(surface: S) -> Arc<Mutex<S>> {
    Arc::new(Mutex::new(surface))
}

/// Lock a shared surface, recovering from a poisoned lock.
///
/// A worker that panicked mid-draw leaves at worst a half-drawn column,
/// which the next draw repairs.
pub fn lock(surface: &SharedSurface) -> MutexGuard<'_, dyn Surface + 'static> {
    surface.lock().unwrap_or_else(PoisonError::into_inner)
}
