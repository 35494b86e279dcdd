//! `MemorySurface`: an in-memory character grid.
//!
//! Cells are stored row-major in a contiguous `Vec`, `index = y * width + x`.
//! Besides headless runs, the surface can keep a journal of every drawing
//! call so the ordering of render jobs can be inspected afterwards.

use super::{Surface, Tone};
use std::io;

/// One occupied cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// The grapheme shown in the cell.
    pub symbol: String,
    /// Tone it was drawn with.
    pub tone: Tone,
}

/// A drawing call recorded by a journaling [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// `clear_column(x, _)` was called.
    ClearColumn(u16),
    /// A glyph was written inside the grid.
    Put {
        /// Column.
        x: u16,
        /// Row.
        y: u16,
        /// Tone.
        tone: Tone,
    },
    /// The whole surface was cleared.
    Clear,
    /// The surface was flushed.
    Flush,
}

/// An in-memory [`Surface`].
#[derive(Debug, Clone)]
pub struct MemorySurface {
    cells: Vec<Option<Glyph>>,
    width: u16,
    height: u16,
    flushes: u64,
    journal: Option<Vec<SurfaceEvent>>,
}

impl MemorySurface {
    /// Create an empty surface of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![None; usize::from(width) * usize::from(height)],
            width,
            height,
            flushes: 0,
            journal: None,
        }
    }

    /// Create an empty surface that records every drawing call.
    pub fn with_journal(width: u16, height: u16) -> Self {
        Self {
            journal: Some(Vec::new()),
            ..Self::new(width, height)
        }
    }

    #[inline]
    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    fn record(&mut self, event: SurfaceEvent) {
        if let Some(journal) = &mut self.journal {
            journal.push(event);
        }
    }

    /// Get the glyph at `(x, y)`, if any.
    pub fn glyph(&self, x: u16, y: u16) -> Option<&Glyph> {
        self.index_of(x, y).and_then(|i| self.cells[i].as_ref())
    }

    /// Number of non-blank cells in column `x`.
    pub fn column_height(&self, x: u16) -> usize {
        (0..self.height)
            .filter_map(|y| self.glyph(x, y))
            .filter(|glyph| !glyph.symbol.trim().is_empty())
            .count()
    }

    /// Tone of the bottom cell of column `x`, if it is occupied.
    pub fn column_tone(&self, x: u16) -> Option<Tone> {
        self.glyph(x, self.height.checked_sub(1)?).map(|glyph| glyph.tone)
    }

    /// Text of row `y` with blank cells as spaces.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .map(|x| self.glyph(x, y).map_or(" ", |glyph| glyph.symbol.as_str()))
            .collect()
    }

    /// How many times the surface was flushed.
    pub const fn flushes(&self) -> u64 {
        self.flushes
    }

    /// Recorded drawing calls, if journaling is enabled.
    pub fn journal(&self) -> &[SurfaceEvent] {
        self.journal.as_deref().unwrap_or_default()
    }

    /// Change the grid size, keeping the top-left content that still fits.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }

        let mut cells = vec![None; usize::from(width) * usize::from(height)];
        for y in 0..self.height.min(height) {
            for x in 0..self.width.min(width) {
                let old = usize::from(y) * usize::from(self.width) + usize::from(x);
                let new = usize::from(y) * usize::from(width) + usize::from(x);
                cells[new] = self.cells[old].take();
            }
        }

        self.cells = cells;
        self.width = width;
        self.height = height;
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn put(&mut self, x: u16, y: u16, symbol: &str, tone: Tone) {
        let Some(idx) = self.index_of(x, y) else {
            return;
        };
        self.cells[idx] = Some(Glyph {
            symbol: symbol.to_string(),
            tone,
        });
        self.record(SurfaceEvent::Put { x, y, tone });
    }

    fn clear_column(&mut self, x: u16, top: u16) {
        for y in top..self.height {
            if let Some(idx) = self.index_of(x, y) {
                self.cells[idx] = None;
            }
        }
        self.record(SurfaceEvent::ClearColumn(x));
    }

    fn clear(&mut self) {
        self.cells.fill(None);
        self.record(SurfaceEvent::Clear);
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        self.record(SurfaceEvent::Flush);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_read_back() {
        let mut surface = MemorySurface::new(10, 4);
        surface.put(3, 2, "█", Tone::Alert);
        assert_eq!(surface.glyph(3, 2).unwrap().tone, Tone::Alert);
        assert_eq!(surface.column_height(3), 1);
        assert!(surface.glyph(3, 3).is_none());
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut surface = MemorySurface::with_journal(4, 4);
        surface.put(4, 0, "x", Tone::Neutral);
        surface.put(0, 4, "x", Tone::Neutral);
        assert!(surface.journal().is_empty());
    }

    #[test]
    fn test_clear_column_respects_top() {
        let mut surface = MemorySurface::new(2, 3);
        for y in 0..3 {
            surface.put(1, y, "█", Tone::Neutral);
        }
        surface.clear_column(1, 1);
        assert!(surface.glyph(1, 0).is_some());
        assert_eq!(surface.column_height(1), 1);
    }

    #[test]
    fn test_resize_keeps_fitting_content() {
        let mut surface = MemorySurface::new(8, 8);
        surface.put(1, 1, "a", Tone::Neutral);
        surface.put(7, 7, "b", Tone::Neutral);
        surface.resize(4, 4);
        assert_eq!(surface.size(), (4, 4));
        assert_eq!(surface.glyph(1, 1).unwrap().symbol, "a");
        assert!(surface.glyph(7, 7).is_none());
    }

    #[test]
    fn test_row_text_and_flush_count() {
        let mut surface = MemorySurface::new(5, 1);
        surface.put(0, 0, "h", Tone::Neutral);
        surface.put(1, 0, "i", Tone::Neutral);
        surface.flush().unwrap();
        assert_eq!(surface.row_text(0), "hi   ");
        assert_eq!(surface.flushes(), 1);
    }
}
