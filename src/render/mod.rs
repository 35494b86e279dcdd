//! Snapshot Renderer: turns the sequence into bars on a [`Surface`].
//!
//! Rendering is stateless. A renderer is handed the sequence as it is at
//! draw time, the surface (whose geometry it queries on every call), an
//! index, and a tone. Anything that does not fit is clipped.

use crate::array::Value;
use crate::surface::{Surface, Tone};
use std::io;

/// Drawing capability the instrumented array depends on.
///
/// Implementations must tolerate any surface geometry: a column or bar
/// that does not fit is skipped, never an error.
pub trait Renderer: Send + Sync {
    /// Screen column of `index`, or `None` if it cannot be represented.
    fn column(&self, index: usize) -> Option<u16>;

    /// First row bars may occupy; rows above are left alone.
    fn top(&self) -> u16 {
        0
    }

    /// Blank the column of `index`.
    fn clear_one(&self, surface: &mut dyn Surface, index: usize) {
        if let Some(x) = self.column(index) {
            surface.clear_column(x, self.top());
        }
    }

    /// Draw the bar for `index` in `tone`. Does not flush.
    fn draw_one(&self, surface: &mut dyn Surface, data: &[Value], index: usize, tone: Tone);

    /// Clear and redraw every bar in increasing index order, then flush once.
    fn draw_all(&self, surface: &mut dyn Surface, data: &[Value], tone: Tone) -> io::Result<()> {
        for index in 0..data.len() {
            self.clear_one(surface, index);
            self.draw_one(surface, data, index, tone);
        }
        surface.flush()
    }
}

/// Glyph used for bar segments.
pub const BAR_GLYPH: &str = "█";

/// Vertical bars, one per element, with a gap column between bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarRenderer {
    glyph: &'static str,
    spacing: u16,
    top_margin: u16,
}

impl Default for BarRenderer {
    fn default() -> Self {
        Self {
            glyph: BAR_GLYPH,
            spacing: 2,
            top_margin: 0,
        }
    }
}

impl BarRenderer {
    /// Renderer with the default glyph and a one-column gap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `rows` at the top of the surface (e.g. for a status line).
    #[must_use]
    pub const fn with_top_margin(mut self, rows: u16) -> Self {
        self.top_margin = rows;
        self
    }

    /// Bar height for `value` on a surface `height` rows tall.
    pub fn bar_height(&self, value: Value, height: u16) -> u16 {
        let usable = height.saturating_sub(self.top_margin);
        u16::try_from(value.clamp(0, Value::from(usable))).unwrap_or(usable)
    }
}

impl Renderer for BarRenderer {
    fn column(&self, index: usize) -> Option<u16> {
        u16::try_from(index).ok()?.checked_mul(self.spacing)
    }

    fn top(&self) -> u16 {
        self.top_margin
    }

    fn draw_one(&self, surface: &mut dyn Surface, data: &[Value], index: usize, tone: Tone) {
        let (width, height) = surface.size();
        let Some(x) = self.column(index).filter(|x| *x < width) else {
            return;
        };
        let Some(&value) = data.get(index) else {
            return;
        };

        for y in 0..self.bar_height(value, height) {
            surface.put(x, height - y - 1, self.glyph, tone);
        }
    }
}
