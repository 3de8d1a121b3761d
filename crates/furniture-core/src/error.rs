//! Error types for furniture

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FurnitureError>;

/// Main error type for furniture
#[derive(Debug, Error)]
pub enum FurnitureError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Shaping failed: {0}")]
    ShapingFailed(#[from] ShapingError),

    #[error("Outline extraction failed: {0}")]
    OutlineFailed(#[from] OutlineError),

    #[error("Variation error: {0}")]
    Variation(#[from] VariationError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,
}

/// Shaping errors
#[derive(Debug, Error)]
pub enum ShapingError {
    #[error("Font data could not be parsed by the shaping engine")]
    InvalidFont,

    #[error("Invalid tag: {0:?}")]
    InvalidTag(String),
}

/// Outline extraction errors
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("Font data could not be parsed for outlines")]
    InvalidFont,

    #[error("Font has no outline for glyph {0}")]
    GlyphNotFound(u32),

    #[error("Drawing glyph {glyph_id} failed: {reason}")]
    DrawFailed { glyph_id: u32, reason: String },

    #[error("Hinting instance could not be created: {0}")]
    HintingFailed(String),
}

/// Variation axis errors
#[derive(Debug, Error, PartialEq)]
pub enum VariationError {
    #[error("Font has no variation axis {0:?}")]
    UnknownAxis(String),

    #[error("Axis tags must be four characters, got {0:?}")]
    InvalidTag(String),

    #[error("Cannot parse axis value {0:?}")]
    InvalidValue(String),
}

/// Layout and placement errors
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Invalid alignment {0:?}: expected vertical N/C/S followed by horizontal W/C/E")]
    InvalidAlignment(String),

    #[error("Font size must be positive, got {0}")]
    InvalidFontSize(f64),

    #[error("Target width must be finite, got {0}")]
    InvalidTarget(f64),
}
