//! Error type shared by the engine, the surfaces, and the dispatch loop.

use std::io;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced to callers.
///
/// Out-of-range indices are contract violations and panic instead of
/// appearing here. Terminal geometry problems are never errors: drawing
/// clips.
#[derive(Debug, Error)]
pub enum Error {
    /// The OS refused to start the render worker thread.
    #[error("failed to spawn render worker: {0}")]
    Spawn(#[source] io::Error),

    /// The render worker panicked before it could be joined.
    #[error("render worker panicked")]
    WorkerPanicked,

    /// Terminal or writer I/O failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration value could not be understood.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
