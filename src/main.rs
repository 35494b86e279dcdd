//! `visusort`: the terminal front end.
//!
//! Stdout is the drawing surface, so logging only happens when a log file
//! is given.

use anyhow::Context;
use clap::Parser;
use log::info;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use visusort::surface::{Palette, SharedSurface};
use visusort::{App, Config, Fill, Flow, TerminalSession};

#[derive(Debug, Parser)]
#[command(name = "visusort", version, about = "Watch sorting algorithms run as animated bars")]
struct Cli {
    /// Number of bars (clipped to what fits on screen)
    #[arg(short = 'n', long, env = "VISUSORT_SIZE", default_value_t = 20)]
    size: usize,

    /// Initial data: random, ascending or descending
    #[arg(long, env = "VISUSORT_FILL", default_value_t = Fill::Random)]
    fill: Fill,

    /// Delay before each highlight, in microseconds
    #[arg(long, env = "VISUSORT_PRE_DELAY_US", default_value_t = 1_000)]
    pre_delay_us: u64,

    /// Delay after each highlight, in microseconds
    #[arg(long, env = "VISUSORT_POST_DELAY_US", default_value_t = 5_000)]
    post_delay_us: u64,

    /// Draw on the main screen instead of the alternate screen
    #[arg(long, env = "VISUSORT_NO_ALT_SCREEN")]
    no_alt_screen: bool,

    /// Seed for reproducible data and shuffles
    #[arg(long, env = "VISUSORT_SEED")]
    seed: Option<u64>,

    /// Number of undo steps kept
    #[arg(long, env = "VISUSORT_HISTORY", default_value_t = 64)]
    history: usize,

    /// Write logs here (filter from VISUSORT_LOG, default "info")
    #[arg(long, env = "VISUSORT_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            size: self.size,
            fill: self.fill,
            pre_delay: Duration::from_micros(self.pre_delay_us),
            post_delay: Duration::from_micros(self.post_delay_us),
            alternate_screen: !self.no_alt_screen,
            seed: self.seed,
            history_capacity: self.history,
        }
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::new().filter_or("VISUSORT_LOG", "info"))
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.config();
    config.validate().context("Invalid configuration")?;

    let session =
        TerminalSession::enter(config.session()).context("Failed to set up the terminal")?;
    let surface: SharedSurface = Arc::new(Mutex::new(session.surface(Palette::default())));

    let mut app = App::new(&config, surface).context("Failed to start the visualizer")?;
    app.show().context("Failed to draw the first frame")?;

    loop {
        let input = session.read_input().context("Failed to read input")?;
        if app.handle(input).context("Command failed")? == Flow::Quit {
            break;
        }
    }

    // The worker and the surface go before the terminal is restored.
    drop(app);
    drop(session);
    info!("bye");
    Ok(())
}
