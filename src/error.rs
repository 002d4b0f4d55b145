//! Error types for the wheel library and its desktop shell.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by configuration, asset loading and the window shell.
///
/// The wheel core itself never fails: empty item lists and degenerate
/// layouts degrade to a blank wheel instead of producing an error.
#[derive(Error, Debug)]
pub enum WheelError {
    /// A palette needs at least one color to cycle through
    #[error("palette must contain at least one color")]
    EmptyPalette,

    /// Color string was not `#RRGGBB`
    #[error("invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),

    /// Font file could not be read
    #[error("failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Font file was read but rusttype could not parse it
    #[error("{path} is not a usable TrueType/OpenType font")]
    InvalidFont { path: PathBuf },

    /// In-memory font data rusttype could not parse
    #[error("font data ({len} bytes) is not a usable TrueType/OpenType font")]
    InvalidFontData { len: usize },

    /// Topic file could not be read
    #[error("failed to read topics from {path}: {source}")]
    TopicsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Topic file is not valid topic JSON
    #[error("failed to parse topics in {path}: {source}")]
    TopicsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("frame buffer error: {0}")]
    Pixels(#[from] pixels::Error),
}

pub type Result<T> = std::result::Result<T, WheelError>;
