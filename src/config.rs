//! Runtime configuration.

use crate::array::Pacing;
use crate::data::Fill;
use crate::error::{Error, Result};
use crate::surface::SessionConfig;
use std::time::Duration;

/// Largest sequence the dispatch loop will generate.
pub const MAX_SIZE: usize = 4096;

/// Configuration for a visualizer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Requested number of bars (clipped to what fits on screen).
    pub size: usize,
    /// Shape of the initial data.
    pub fill: Fill,
    /// Delay between clearing a column and drawing its highlight.
    pub pre_delay: Duration,
    /// Delay after a highlight is flushed.
    pub post_delay: Duration,
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Seed for reproducible data and shuffles.
    pub seed: Option<u64>,
    /// Number of snapshots kept for undo.
    pub history_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 20,
            fill: Fill::Random,
            pre_delay: Duration::from_millis(1),
            post_delay: Duration::from_millis(5),
            alternate_screen: true,
            seed: None,
            history_capacity: 64,
        }
    }
}

impl Config {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(Error::InvalidArgument(format!(
                "size must be between 1 and {MAX_SIZE}, got {}",
                self.size
            )));
        }
        if self.history_capacity == 0 {
            return Err(Error::InvalidArgument(
                "history capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Pacing initialised from the configured delays.
    pub fn pacing(&self) -> Pacing {
        Pacing::new(self.pre_delay, self.post_delay)
    }

    /// Terminal session settings.
    pub const fn session(&self) -> SessionConfig {
        SessionConfig {
            alternate_screen: self.alternate_screen,
        }
    }
}
