//! The contracts that bind the stages together
//!
//! - [`FontRef`] - Your window into font data and metrics
//! - [`Shaper`] - Where characters become glyphs
//! - [`OutlineSource`] - Where glyph ids become cubic outlines

use crate::{
    error::Result,
    types::{GlyphId, GlyphOutline, OutlineMode, ShapingResult},
    variations::{VariationAxis, VariationContext},
    ShapingParams,
};
use std::sync::Arc;

/// Read-only view of a loaded font
///
/// Implementations are shared across threads and never mutated after
/// loading. A handle with empty [`data`](FontRef::data) is a metrics-only
/// font: shapers fall back to nominal glyph lookup for it.
///
/// ```ignore
/// struct MyFont {
///     data: Vec<u8>,
/// }
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] {
///         &self.data
///     }
///
///     fn units_per_em(&self) -> u16 {
///         1000
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         Some(ch as u32)
///     }
///
///     fn advance_width(&self, glyph_id: GlyphId) -> f32 {
///         500.0
///     }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    fn data(&self) -> &[u8];

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Nominal glyph for a character, `None` when the font lacks it
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Default-instance advance in font units
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// Face within a collection file; 0 for single fonts
    fn face_index(&self) -> u32 {
        0
    }

    fn glyph_count(&self) -> Option<u32> {
        None
    }

    /// Variation axes in font order; empty for static fonts
    fn axes(&self) -> Vec<VariationAxis> {
        Vec::new()
    }

    /// Cap height in font units, when the font records one
    fn cap_height(&self) -> Option<f32> {
        None
    }

    /// PostScript glyph name, when the font records one
    fn glyph_name(&self, _glyph_id: GlyphId) -> Option<String> {
        None
    }

    /// Whether the font carries the Arabic tatweel (U+0640)
    fn has_kashida(&self) -> bool {
        self.glyph_id('\u{0640}').is_some()
    }
}

/// Where characters learn their positions
///
/// Results are in font design units. Shapers must apply
/// `params.variations` before shaping so substitutions and kerning match the
/// variable instance.
pub trait Shaper: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Transform characters into positioned glyphs
    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<ShapingResult>;
}

/// Where glyph ids become outlines
///
/// Outlines come back in font design units, y up, containing only
/// move/line/cubic/close segments.
pub trait OutlineSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn outline(
        &self,
        glyph_id: GlyphId,
        variations: &VariationContext,
        mode: OutlineMode,
    ) -> Result<GlyphOutline>;
}
