//! Status line: one row at the top of the screen with a message on the
//! left and the run settings on the right.

use crate::surface::{Surface, Tone};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Two-section status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    /// Left section (the latest message).
    left: String,
    /// Right section (settings summary).
    right: String,
}

impl StatusLine {
    /// Empty status line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message.
    pub fn set_left(&mut self, text: impl Into<String>) {
        self.left = text.into();
    }

    /// Set the settings summary.
    pub fn set_right(&mut self, text: impl Into<String>) {
        self.right = text.into();
    }

    /// The message.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// The settings summary.
    pub fn right(&self) -> &str {
        &self.right
    }

    /// Draw onto `row` of `surface`. Does not flush.
    ///
    /// The right section wins when space is short; the left one is clipped
    /// at a grapheme boundary.
    pub fn render(&self, surface: &mut dyn Surface, row: u16) {
        let (width, height) = surface.size();
        if row >= height {
            return;
        }

        for x in 0..width {
            surface.put(x, row, " ", Tone::Neutral);
        }

        let right_width = display_width(&self.right).min(width);
        let right_start = width - right_width;
        draw_clipped(surface, &self.right, right_start, row, width);

        // Keep one blank cell between the sections.
        let left_end = right_start.saturating_sub(u16::from(right_width > 0));
        draw_clipped(surface, &self.left, 0, row, left_end);
    }
}

fn display_width(text: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}

/// Write graphemes from `start` until the next one would cross `end`.
fn draw_clipped(surface: &mut dyn Surface, text: &str, start: u16, row: u16, end: u16) {
    let mut x = start;
    for grapheme in text.graphemes(true) {
        let width = display_width(grapheme);
        if width == 0 {
            continue;
        }
        if x.saturating_add(width) > end {
            break;
        }
        surface.put(x, row, grapheme, Tone::Neutral);
        x += width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn test_sections_on_one_row() {
        let mut surface = MemorySurface::new(20, 3);
        let mut line = StatusLine::new();
        line.set_left("sorted");
        line.set_right("n=5");
        line.render(&mut surface, 0);

        let text = surface.row_text(0);
        assert!(text.starts_with("sorted"));
        assert!(text.trim_end().ends_with("n=5"));
        assert_eq!(surface.column_height(0), 1);
    }

    #[test]
    fn test_left_is_clipped_before_right() {
        let mut surface = MemorySurface::new(10, 1);
        let mut line = StatusLine::new();
        line.set_left("a very long message");
        line.set_right("xyz");
        line.render(&mut surface, 0);
        assert_eq!(surface.row_text(0), "a very xyz");
    }

    #[test]
    fn test_wide_grapheme_not_split() {
        let mut surface = MemorySurface::new(3, 1);
        let mut line = StatusLine::new();
        line.set_left("ab\u{4e2d}");
        line.render(&mut surface, 0);
        assert_eq!(surface.glyph(1, 0).map(|g| g.symbol.as_str()), Some("b"));
        assert_eq!(surface.glyph(2, 0).map(|g| g.symbol.as_str()), Some(" "));
    }

    #[test]
    fn test_row_outside_surface_is_ignored() {
        let mut surface = MemorySurface::new(4, 1);
        let mut line = StatusLine::new();
        line.set_left("x");
        line.render(&mut surface, 3);
        assert_eq!(surface.row_text(0).trim(), "");
    }
}
