//! Tones, true-color values, and the palette that maps one to the other.

use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

bitflags! {
    /// Glyph style modifiers.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold glyph
        const BOLD = 0b0000_0001;
        /// Dim/faint glyph
        const DIM = 0b0000_0010;
        /// Underlined glyph
        const UNDERLINE = 0b0000_0100;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0000_1000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

impl Modifiers {
    /// SGR parameter codes for every set flag, in ascending order.
    pub fn sgr_codes(self) -> impl Iterator<Item = u8> {
        [
            (Self::BOLD, 1),
            (Self::DIM, 2),
            (Self::UNDERLINE, 4),
            (Self::REVERSED, 7),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, code)| code)
    }
}

/// Display role of a glyph. Carries no data, only meaning for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    /// Resting bar.
    #[default]
    Neutral,
    /// Final state after a completed sort.
    Success,
    /// Bar currently being touched by an instrumented access.
    InProgress,
    /// Landmark worth attention, e.g. a quicksort pivot.
    Alert,
    /// Manually placed marker, e.g. a merge midpoint.
    ManualPointer,
}

/// Resolved look of a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Foreground color.
    pub fg: Rgb,
    /// Extra attributes.
    pub modifiers: Modifiers,
}

impl Style {
    /// Plain style with no modifiers.
    pub const fn plain(fg: Rgb) -> Self {
        Self {
            fg,
            modifiers: Modifiers::empty(),
        }
    }
}

/// Tone → style table used by the ANSI surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Style for [`Tone::Neutral`].
    pub neutral: Style,
    /// Style for [`Tone::Success`].
    pub success: Style,
    /// Style for [`Tone::InProgress`].
    pub in_progress: Style,
    /// Style for [`Tone::Alert`].
    pub alert: Style,
    /// Style for [`Tone::ManualPointer`].
    pub manual_pointer: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            neutral: Style::plain(Rgb::WHITE),
            success: Style::plain(Rgb::new(0, 200, 100)),
            in_progress: Style::plain(Rgb::from_u32(0xFF_C8_00)),
            alert: Style {
                fg: Rgb::new(230, 60, 60),
                modifiers: Modifiers::BOLD,
            },
            manual_pointer: Style {
                fg: Rgb::new(80, 200, 255),
                modifiers: Modifiers::BOLD,
            },
        }
    }
}

impl Palette {
    /// Look up the style for a tone.
    pub const fn style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Neutral => self.neutral,
            Tone::Success => self.success,
            Tone::InProgress => self.in_progress,
            Tone::Alert => self.alert,
            Tone::ManualPointer => self.manual_pointer,
        }
    }
}
