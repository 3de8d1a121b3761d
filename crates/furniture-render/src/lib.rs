//! Geometry for furniture: glyph outlines, curve cutting and output sinks
//!
//! - [`outlines`] turns glyph ids into cubic-only outlines through skrifa,
//!   with variation coordinates applied to a lockable face
//! - [`glyph_cache`] remembers extracted outlines per instance
//! - [`curve_cutter`] answers "where is the path after this much length"
//! - [`sink`] collects placed glyphs as one path or as per-glyph records

pub mod curve_cutter;
pub mod glyph_cache;
pub mod outlines;
pub mod sink;

pub use curve_cutter::{CurveCutter, LineLength};
pub use glyph_cache::{OutlineCache, OutlineCacheStats};
pub use outlines::{raise_quadratic, CubicPen, FaceOutliner, OutlineFace, SharedFace};
pub use sink::{GlyphRecord, OutputSink};
