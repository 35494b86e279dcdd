//! Key dispatch: maps key presses to sorts, transforms, and history moves,
//! and keeps the status line current.
//!
//! The dispatch loop runs on the caller thread. Every command finishes
//! (its last render job joined) before the next key is read, so the
//! screen always settles on the final state of each run.

pub mod keys;
mod status;

pub use status::StatusLine;

use crate::algo::{flatten, shuffle, Algorithm, SortStats};
use crate::array::{InstrumentedArray, Value};
use crate::config::Config;
use crate::data::{generate, Fill};
use crate::error::Result;
use crate::history::HistoryRing;
use crate::render::BarRenderer;
use crate::surface::{self, SharedSurface, Tone};
use keys::{Input, KeyCode, KeyModifiers};
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Bogosort is refused on sequences longer than this.
pub const BOGO_LIMIT: usize = 10;

/// One-line key reference shown by `?`.
pub const HELP: &str = "b bubble  i insertion  m merge  k quick  h heap  c counting  o bogo  \
    s library  r shuffle  f flatten  g/a/d new data  u/U undo/redo  +/- speed  q quit";

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run a sort.
    Sort(Algorithm),
    /// Fisher–Yates shuffle.
    Shuffle,
    /// Set every bar to the mean.
    Flatten,
    /// Generate fresh data.
    Regenerate(Fill),
    /// Step back in history.
    Undo,
    /// Step forward in history.
    Redo,
    /// Halve the delays.
    Faster,
    /// Double the delays.
    Slower,
    /// Show the key reference.
    Help,
    /// Leave the program.
    Quit,
}

impl Command {
    /// The command bound to a key, if any.
    pub const fn from_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Self> {
        if modifiers.control {
            return match code {
                KeyCode::Char('c') => Some(Self::Quit),
                _ => None,
            };
        }

        Some(match code {
            KeyCode::Char('b') => Self::Sort(Algorithm::Bubble),
            KeyCode::Char('i') => Self::Sort(Algorithm::Insertion),
            KeyCode::Char('m') => Self::Sort(Algorithm::Merge),
            KeyCode::Char('k') => Self::Sort(Algorithm::Quick),
            KeyCode::Char('h') => Self::Sort(Algorithm::Heap),
            KeyCode::Char('c') => Self::Sort(Algorithm::Counting),
            KeyCode::Char('o') => Self::Sort(Algorithm::Bogo),
            KeyCode::Char('s') => Self::Sort(Algorithm::Library),
            KeyCode::Char('r') => Self::Shuffle,
            KeyCode::Char('f') => Self::Flatten,
            KeyCode::Char('g') => Self::Regenerate(Fill::Random),
            KeyCode::Char('a') => Self::Regenerate(Fill::Ascending),
            KeyCode::Char('d') => Self::Regenerate(Fill::Descending),
            KeyCode::Char('u') => Self::Undo,
            KeyCode::Char('U') => Self::Redo,
            KeyCode::Char('+' | '=') => Self::Faster,
            KeyCode::Char('-') => Self::Slower,
            KeyCode::Char('?') => Self::Help,
            KeyCode::Char('q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        })
    }
}

/// Whether the dispatch loop should keep reading keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next key.
    Continue,
    /// Leave the loop.
    Quit,
}

/// The visualizer: the instrumented sequence, its history, and the screen.
pub struct App {
    array: InstrumentedArray,
    history: HistoryRing,
    rng: SmallRng,
    surface: SharedSurface,
    status: StatusLine,
    /// Largest value that fits under the status line.
    max_value: Value,
}

impl App {
    /// Build the visualizer on `surface`, generating the initial data.
    ///
    /// The sequence length is the configured size clipped to the number of
    /// bars that fit across the surface.
    pub fn new(config: &Config, surface: SharedSurface) -> Result<Self> {
        config.validate()?;

        let (width, height) = surface::lock(&surface).size();
        let len = config.size.min(usize::from(width / 2));
        let max_value = Value::from(height.saturating_sub(1));

        let mut rng = config
            .seed
            .map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);
        let values = generate(config.fill, len, max_value, &mut rng);

        let array = InstrumentedArray::new(
            values,
            surface.clone(),
            Arc::new(BarRenderer::new().with_top_margin(1)),
            Arc::new(config.pacing()),
        );

        let mut history = HistoryRing::new(config.history_capacity);
        history.record(array.snapshot());

        info!(
            "visualizer ready: {len} bars ({} fill), values up to {max_value}",
            config.fill
        );

        let mut app = Self {
            array,
            history,
            rng,
            surface,
            status: StatusLine::new(),
            max_value,
        };
        app.status.set_left("press ? for keys");
        app.refresh_settings();
        Ok(app)
    }

    /// The instrumented sequence.
    pub const fn array(&self) -> &InstrumentedArray {
        &self.array
    }

    /// Undo history.
    pub const fn history(&self) -> &HistoryRing {
        &self.history
    }

    /// The status line as last drawn.
    pub const fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Clear the screen and draw everything.
    pub fn show(&mut self) -> Result<()> {
        self.array.join()?;
        surface::lock(&self.surface).clear();
        self.array.redraw(Tone::Neutral)?;
        self.draw_status()
    }

    /// React to one input event.
    pub fn handle(&mut self, input: Input) -> Result<Flow> {
        match input {
            Input::Key { code, modifiers } => match Command::from_key(code, modifiers) {
                Some(command) => self.execute(command),
                None => {
                    debug!("unbound key {code:?}");
                    Ok(Flow::Continue)
                }
            },
            Input::Resize => {
                self.show()?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Run one command to completion.
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Sort(algorithm) => self.sort(algorithm)?,
            Command::Shuffle => {
                self.announce("shuffling")?;
                let stats = shuffle(&mut self.array, &mut self.rng)?;
                self.finish("shuffle", stats, Tone::Neutral)?;
            }
            Command::Flatten => {
                self.announce("flattening")?;
                let stats = flatten(&mut self.array)?;
                self.finish("flatten", stats, Tone::Neutral)?;
            }
            Command::Regenerate(fill) => {
                let len = self.array.len();
                let values = generate(fill, len, self.max_value, &mut self.rng);
                self.array.replace(values)?;
                self.history.record(self.array.snapshot());
                self.status.set_left(format!("new {fill} data"));
                self.show()?;
            }
            Command::Undo => match self.history.undo() {
                Some(snapshot) => {
                    self.apply(snapshot)?;
                    self.status
                        .set_left(format!("undo ({} steps back)", self.history.cursor()));
                    self.draw_status()?;
                }
                None => self.say("nothing to undo")?,
            },
            Command::Redo => match self.history.redo() {
                Some(snapshot) => {
                    self.apply(snapshot)?;
                    self.status
                        .set_left(format!("redo ({} steps back)", self.history.cursor()));
                    self.draw_status()?;
                }
                None => self.say("nothing to redo")?,
            },
            Command::Faster => {
                self.array.pacing().faster();
                self.refresh_settings();
                self.say("faster")?;
            }
            Command::Slower => {
                self.array.pacing().slower();
                self.refresh_settings();
                self.say("slower")?;
            }
            Command::Help => self.say(HELP)?,
            Command::Quit => {
                self.array.join()?;
                info!("quit requested");
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn sort(&mut self, algorithm: Algorithm) -> Result<()> {
        if algorithm == Algorithm::Bogo && self.array.len() > BOGO_LIMIT {
            warn!(
                "bogosort refused for {} elements (limit {BOGO_LIMIT})",
                self.array.len()
            );
            return self.say(&format!("bogosort needs at most {BOGO_LIMIT} bars"));
        }

        self.announce(&format!("running {}", algorithm.label()))?;
        let stats = algorithm.run(&mut self.array, &mut self.rng)?;
        self.finish(algorithm.label(), stats, Tone::Success)
    }

    /// Show what is about to run before the first render job starts.
    fn announce(&mut self, message: &str) -> Result<()> {
        self.status.set_left(message);
        self.draw_status()
    }

    /// Settle the screen after a run and record the result.
    fn finish(&mut self, what: &str, stats: SortStats, tone: Tone) -> Result<()> {
        self.array.join()?;
        self.array.redraw(tone)?;
        self.history.record(self.array.snapshot());
        info!("{what}: {stats}");
        self.status.set_left(format!("{what}: {stats}"));
        self.draw_status()
    }

    /// Show a history snapshot. Same-length snapshots are animated by a
    /// continuous sweep; anything else replaces the sequence outright.
    fn apply(&mut self, snapshot: Vec<Value>) -> Result<()> {
        if snapshot.len() == self.array.len() {
            self.array.start_render()?;
            self.array.restore(&snapshot);
            self.array.stop_render()
        } else {
            self.array.replace(snapshot)?;
            self.show()
        }
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.status.set_left(message);
        self.draw_status()
    }

    fn refresh_settings(&mut self) {
        let pacing = self.array.pacing();
        self.status.set_right(format!(
            "{} bars  {}us/{}us",
            self.array.len(),
            pacing.pre_delay().as_micros(),
            pacing.post_delay().as_micros()
        ));
    }

    fn draw_status(&mut self) -> Result<()> {
        self.array.join()?;
        self.refresh_settings();
        let mut screen = surface::lock(&self.surface);
        self.status.render(&mut *screen, 0);
        screen.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("array", &self.array)
            .field("history", &self.history.len())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::is_sorted;
    use crate::surface::{share, MemorySurface};
    use std::sync::Mutex;
    use std::time::Duration;

    fn app_on(width: u16, height: u16, size: usize) -> (App, Arc<Mutex<MemorySurface>>) {
        let surface = share(MemorySurface::new(width, height));
        let config = Config {
            size,
            pre_delay: Duration::ZERO,
            post_delay: Duration::ZERO,
            seed: Some(17),
            ..Config::default()
        };
        let app = App::new(&config, surface.clone()).unwrap();
        (app, surface)
    }

    fn press(c: char) -> Input {
        Input::Key {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_map() {
        let none = KeyModifiers::NONE;
        assert_eq!(
            Command::from_key(KeyCode::Char('k'), none),
            Some(Command::Sort(Algorithm::Quick))
        );
        assert_eq!(Command::from_key(KeyCode::Char('U'), none), Some(Command::Redo));
        assert_eq!(Command::from_key(KeyCode::Esc, none), Some(Command::Quit));
        assert_eq!(
            Command::from_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Command::Quit)
        );
        assert_eq!(
            Command::from_key(KeyCode::Char('d'), none),
            Some(Command::Regenerate(Fill::Descending))
        );
        assert_eq!(Command::from_key(KeyCode::Char('z'), none), None);
        assert_eq!(Command::from_key(KeyCode::Char('x'), none), None);
    }

    #[test]
    fn test_length_clipped_to_width() {
        let (app, _surface) = app_on(12, 10, 20);
        assert_eq!(app.array().len(), 6);
        assert!(app.array().snapshot().iter().all(|v| (1..=9).contains(v)));
    }

    #[test]
    fn test_sort_then_undo_then_redo() {
        let (mut app, surface) = app_on(40, 12, 12);
        app.execute(Command::Regenerate(Fill::Descending)).unwrap();
        let before = app.array().snapshot();

        assert_eq!(app.handle(press('b')).unwrap(), Flow::Continue);
        let sorted = app.array().snapshot();
        assert!(is_sorted(&sorted));
        assert_eq!(surface.lock().unwrap().column_tone(0), Some(Tone::Success));

        app.handle(press('u')).unwrap();
        assert_eq!(app.array().snapshot(), before);
        assert!(!app.array().is_animating());

        app.handle(press('U')).unwrap();
        assert_eq!(app.array().snapshot(), sorted);
        assert_eq!(app.history().cursor(), 0);
    }

    #[test]
    fn test_undo_at_oldest_reports() {
        let (mut app, _surface) = app_on(20, 8, 5);
        app.execute(Command::Undo).unwrap();
        assert_eq!(app.status().left(), "nothing to undo");
    }

    #[test]
    fn test_bogo_refused_when_long() {
        let (mut app, _surface) = app_on(60, 10, 20);
        let before = app.array().snapshot();
        app.execute(Command::Sort(Algorithm::Bogo)).unwrap();
        assert_eq!(app.array().snapshot(), before);
        assert_eq!(app.array().stats().jobs, 0);
        assert!(app.status().left().contains("at most"));
    }

    #[test]
    fn test_every_sort_settles_sorted() {
        // Small enough for bogosort to finish quickly.
        let (mut app, _surface) = app_on(40, 16, 5);
        for algorithm in Algorithm::ALL {
            app.execute(Command::Shuffle).unwrap();
            app.execute(Command::Sort(algorithm)).unwrap();
            assert!(is_sorted(&app.array().snapshot()), "{}", algorithm.label());
        }
    }

    #[test]
    fn test_status_line_on_top_row() {
        let (mut app, surface) = app_on(80, 10, 4);
        app.show().unwrap();
        app.execute(Command::Help).unwrap();
        let row = surface.lock().unwrap().row_text(0);
        assert!(row.starts_with("b bubble"));
        assert!(row.trim_end().ends_with("us"));
    }

    #[test]
    fn test_speed_keys_adjust_pacing() {
        let (mut app, _surface) = app_on(20, 8, 3);
        app.execute(Command::Slower).unwrap();
        assert_eq!(app.array().pacing().post_delay(), Duration::from_micros(100));
        app.execute(Command::Faster).unwrap();
        assert_eq!(app.array().pacing().post_delay(), Duration::from_micros(50));
    }

    #[test]
    fn test_quit_and_resize() {
        let (mut app, surface) = app_on(20, 8, 3);
        surface.lock().unwrap().resize(10, 6);
        assert_eq!(app.handle(Input::Resize).unwrap(), Flow::Continue);
        assert_eq!(app.handle(press('q')).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_hot_point_scenario() {
        let (mut app, surface) = app_on(20, 8, 4);
        app.execute(Command::Regenerate(Fill::Ascending)).unwrap();
        let before = app.array().snapshot();
        app.array.hot_point(1, Tone::ManualPointer).unwrap();
        assert_eq!(app.array().snapshot(), before);
        assert_eq!(surface.lock().unwrap().column_tone(2), Some(Tone::ManualPointer));
    }
}
