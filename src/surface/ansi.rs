//! `AnsiSurface`: escape-sequence output with a single write per flush.
//!
//! Every drawing call appends to a pre-allocated byte buffer; [`flush`]
//! hands the whole frame to the writer in one `write_all` so partially
//! drawn columns never reach the screen.
//!
//! [`flush`]: Surface::flush

use super::{Palette, Rgb, Surface, Tone};
use crossterm::terminal;
use log::debug;
use std::io::{self, Write};

/// Where an [`AnsiSurface`] gets its dimensions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Ask the controlling terminal once per frame: at creation, after
    /// every flush, and on a full clear.
    Terminal,
    /// A fixed size, for captured output.
    Fixed {
        /// Width in columns.
        width: u16,
        /// Height in rows.
        height: u16,
    },
}

/// Fallback when the terminal cannot report its size.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// A [`Surface`] that renders to ANSI escape sequences.
pub struct AnsiSurface<W: Write + Send> {
    writer: W,
    pending: Vec<u8>,
    geometry: Geometry,
    palette: Palette,
    /// Tone of the last emitted SGR state (None = unknown/reset).
    pen: Option<Tone>,
    /// Dimensions used until the next refresh.
    size: (u16, u16),
    /// How many times the geometry was queried.
    size_queries: u64,
}

impl<W: Write + Send> AnsiSurface<W> {
    /// Create a surface writing to `writer`.
    pub fn new(writer: W, geometry: Geometry, palette: Palette) -> Self {
        let mut surface = Self {
            writer,
            pending: Vec::with_capacity(16 * 1024),
            geometry,
            palette,
            pen: None,
            size: FALLBACK_SIZE,
            size_queries: 0,
        };
        surface.refresh_size();
        surface
    }

    /// Re-read the dimensions from the geometry source.
    fn refresh_size(&mut self) {
        let size = match self.geometry {
            Geometry::Terminal => terminal::size().unwrap_or(FALLBACK_SIZE),
            Geometry::Fixed { width, height } => (width, height),
        };
        self.size_queries += 1;
        if size != self.size {
            debug!(
                "surface geometry {}x{} (query {})",
                size.0, size.1, self.size_queries
            );
            self.size = size;
        }
    }

    /// Get a reference to the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Bytes queued since the last flush.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Move cursor to (x, y) position (1-indexed for ANSI).
    #[inline]
    fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H
        let _ = write!(self.pending, "\x1b[{};{}H", y + 1, x + 1);
    }

    #[inline]
    fn reset_attrs(&mut self) {
        self.pending.extend_from_slice(b"\x1b[0m");
        self.pen = None;
    }

    #[inline]
    fn set_fg(&mut self, color: Rgb) {
        let _ = write!(self.pending, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Emit SGR for `tone` unless it is already active.
    fn set_pen(&mut self, tone: Tone) {
        if self.pen == Some(tone) {
            return;
        }
        self.reset_attrs();
        let style = self.palette.style(tone);
        self.set_fg(style.fg);
        for code in style.modifiers.sgr_codes() {
            let _ = write!(self.pending, "\x1b[{code}m");
        }
        self.pen = Some(tone);
    }
}

impl<W: Write + Send> Surface for AnsiSurface<W> {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn put(&mut self, x: u16, y: u16, symbol: &str, tone: Tone) {
        let (width, height) = self.size();
        if x >= width || y >= height {
            return;
        }
        self.cursor_move(x, y);
        self.set_pen(tone);
        self.pending.extend_from_slice(symbol.as_bytes());
    }

    fn clear_column(&mut self, x: u16, top: u16) {
        let (width, height) = self.size();
        if x >= width {
            return;
        }
        self.reset_attrs();
        for y in top..height {
            self.cursor_move(x, y);
            self.pending.push(b' ');
        }
    }

    fn clear(&mut self) {
        self.refresh_size();
        self.reset_attrs();
        self.pending.extend_from_slice(b"\x1b[2J");
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.writer.write_all(&self.pending)?;
            self.pending.clear();
        }
        self.refresh_size();
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(width: u16, height: u16) -> AnsiSurface<Vec<u8>> {
        AnsiSurface::new(Vec::new(), Geometry::Fixed { width, height }, Palette::default())
    }

    fn screen(bytes: &[u8], width: u16, height: u16) -> vt100::Parser {
        let mut parser = vt100::Parser::new(height, width, 0);
        parser.process(bytes);
        parser
    }

    #[test]
    fn test_put_reaches_screen_with_color() {
        let mut surface = fixed(10, 5);
        surface.put(2, 4, "█", Tone::InProgress);
        surface.flush().unwrap();

        let parser = screen(surface.get_ref(), 10, 5);
        let cell = parser.screen().cell(4, 2).unwrap();
        assert_eq!(cell.contents(), "█");
        let fg = Palette::default().in_progress.fg;
        assert_eq!(cell.fgcolor(), vt100::Color::Rgb(fg.r, fg.g, fg.b));
    }

    #[test]
    fn test_nothing_written_before_flush() {
        let mut surface = fixed(10, 5);
        surface.put(0, 0, "x", Tone::Neutral);
        assert!(surface.get_ref().is_empty());
        assert!(!surface.pending().is_empty());
        surface.flush().unwrap();
        assert!(surface.pending().is_empty());
    }

    #[test]
    fn test_pen_not_repeated_for_same_tone() {
        let mut surface = fixed(10, 5);
        surface.put(0, 0, "a", Tone::Alert);
        surface.put(1, 0, "b", Tone::Alert);
        let text = String::from_utf8(surface.pending().to_vec()).unwrap();
        assert_eq!(text.matches("\x1b[38;2;").count(), 1);
        assert!(text.contains("\x1b[1m"));
    }

    #[test]
    fn test_clear_column_blanks_cells() {
        let mut surface = fixed(4, 3);
        for y in 0..3 {
            surface.put(1, y, "█", Tone::Neutral);
        }
        surface.clear_column(1, 1);
        surface.flush().unwrap();

        let parser = screen(surface.get_ref(), 4, 3);
        assert_eq!(parser.screen().cell(0, 1).unwrap().contents(), "█");
        assert_eq!(parser.screen().cell(1, 1).unwrap().contents(), " ");
        assert_eq!(parser.screen().cell(2, 1).unwrap().contents(), " ");
    }

    #[test]
    fn test_out_of_bounds_writes_nothing() {
        let mut surface = fixed(4, 3);
        surface.put(4, 0, "x", Tone::Neutral);
        surface.put(0, 3, "x", Tone::Neutral);
        surface.clear_column(9, 0);
        assert!(surface.pending().is_empty());
    }

    #[test]
    fn test_geometry_queried_once_per_frame() {
        let mut surface = AnsiSurface::new(Vec::new(), Geometry::Terminal, Palette::default());
        assert_eq!(surface.size_queries, 1);

        let (width, height) = surface.size();
        for x in 0..width.min(20) {
            surface.clear_column(x, 0);
            for y in 0..height {
                surface.put(x, y, "█", Tone::Neutral);
            }
        }
        assert_eq!(surface.size_queries, 1);

        surface.flush().unwrap();
        assert_eq!(surface.size_queries, 2);
        surface.clear();
        assert_eq!(surface.size_queries, 3);
    }
}
