//! Terminal session: scoped acquisition of the controlling terminal.
//!
//! Entering a session switches to raw mode (and optionally the alternate
//! screen) and hides the cursor; dropping it restores everything, also on
//! early returns and panics that unwind.

use super::{AnsiSurface, Geometry, Palette};
use crate::app::keys::{convert_key_event, Input};
use crate::error::Result;
use crossterm::{
    cursor, event, execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use std::io::{self, Stdout};

/// Configuration for a terminal session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
        }
    }
}

/// Exclusive handle on the terminal for the lifetime of the program.
pub struct TerminalSession {
    config: SessionConfig,
}

impl TerminalSession {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn enter(config: SessionConfig) -> Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, Drop restores whatever was changed.
        let session = Self { config };

        let mut stdout = io::stdout();
        if session.config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, cursor::Hide, Clear(ClearType::All))?;

        let (width, height) = terminal::size()?;
        info!("terminal session entered ({width}x{height})");
        Ok(session)
    }

    /// A surface drawing to this terminal's stdout.
    pub fn surface(&self, palette: Palette) -> AnsiSurface<Stdout> {
        AnsiSurface::new(io::stdout(), Geometry::Terminal, palette)
    }

    /// Block until a bound key is pressed or the terminal is resized.
    pub fn read_input(&self) -> Result<Input> {
        loop {
            match event::read()? {
                event::Event::Key(key) => {
                    if let Some((code, modifiers)) = convert_key_event(key) {
                        return Ok(Input::Key { code, modifiers });
                    }
                }
                event::Event::Resize(width, height) => {
                    debug!("terminal resized to {width}x{height}");
                    return Ok(Input::Resize);
                }
                _ => {}
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        info!("terminal session restored");
    }
}
