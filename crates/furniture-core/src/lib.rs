//! Furniture Core: the shared vocabulary of the layout engine
//!
//! Text becomes outlines in a handful of steps, each owned by a different
//! crate. This one holds the data that flows between them and the traits
//! that let the steps be swapped out:
//!
//! 1. **Axes** - requested variation values are resolved against the font's axes
//! 2. **Shaping** - characters become positioned glyphs ([`Shaper`])
//! 3. **Spacing** - tracking and script-aware spacing move glyph frames
//! 4. **Outlines** - glyph ids become cubic-only paths ([`OutlineSource`])
//!
//! Data flows through the types in [`types`]. Glyph placements are kept in
//! font design units until the orchestrator scales them to a point size.

pub mod cache_config;
pub mod error;
pub mod traits;
pub mod variations;

pub use error::{FurnitureError, Result};
pub use traits::{FontRef, OutlineSource, Shaper};
pub use variations::{
    AxisDiagnostic, AxisModel, AxisValue, NormalizeOptions, Normalized, VariableFace,
    VariationAxis, VariationContext, VariationSettings,
};

/// The data structures that move between stages
pub mod types {
    use kurbo::{Affine, BezPath, Point, Rect};

    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// Which way the text flows
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Direction {
        LeftToRight,
        RightToLeft,
        TopToBottom,
        BottomToTop,
    }

    /// One shaped glyph and the box it occupies on the line
    ///
    /// `frame` starts at the pen position with the glyph's advance as width.
    /// Spacing and scaling passes return moved copies; nothing edits a
    /// placement in place.
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlyphPlacement {
        pub id: GlyphId,
        /// Byte offset of the source character in the shaped text
        pub cluster: u32,
        pub advance_x: f64,
        pub advance_y: f64,
        pub offset_x: f64,
        pub offset_y: f64,
        pub frame: Rect,
    }

    impl GlyphPlacement {
        /// Copy with the frame shifted horizontally
        pub fn shifted(&self, dx: f64) -> Self {
            Self {
                frame: self.frame + kurbo::Vec2::new(dx, 0.0),
                ..self.clone()
            }
        }

        /// Copy with every metric multiplied by `factor`
        pub fn scaled(&self, factor: f64) -> Self {
            let f = self.frame;
            Self {
                id: self.id,
                cluster: self.cluster,
                advance_x: self.advance_x * factor,
                advance_y: self.advance_y * factor,
                offset_x: self.offset_x * factor,
                offset_y: self.offset_y * factor,
                frame: Rect::new(f.x0 * factor, f.y0 * factor, f.x1 * factor, f.y1 * factor),
            }
        }
    }

    /// What emerges after shaping: design-unit placements in visual order
    #[derive(Debug, Clone)]
    pub struct ShapingResult {
        pub glyphs: Vec<GlyphPlacement>,
        pub advance_width: f64,
        pub units_per_em: u16,
        pub direction: Direction,
    }

    /// Which extraction strategy produces a glyph outline
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub enum OutlineMode {
        /// Grid-fitted through the hinting engine, like a rasterizer would see it
        #[default]
        Rasterizer,
        /// The source curves exactly as stored in the font's glyph table
        Native,
    }

    /// A single drawing command of a cubic-only outline
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum OutlineSegment {
        MoveTo(Point),
        LineTo(Point),
        CubicTo(Point, Point, Point),
        Close,
    }

    /// Cubic-only glyph outline in font design units, y pointing up
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct GlyphOutline {
        segments: Vec<OutlineSegment>,
    }

    impl GlyphOutline {
        pub fn new(segments: Vec<OutlineSegment>) -> Self {
            Self { segments }
        }

        pub fn segments(&self) -> &[OutlineSegment] {
            &self.segments
        }

        pub fn is_empty(&self) -> bool {
            self.segments.is_empty()
        }

        /// Convert into a `kurbo::BezPath` with `transform` applied
        pub fn to_bez_path(&self, transform: Affine) -> BezPath {
            let mut path = BezPath::new();
            for segment in &self.segments {
                match *segment {
                    OutlineSegment::MoveTo(p) => path.move_to(transform * p),
                    OutlineSegment::LineTo(p) => path.line_to(transform * p),
                    OutlineSegment::CubicTo(c1, c2, p) => {
                        path.curve_to(transform * c1, transform * c2, transform * p)
                    },
                    OutlineSegment::Close => path.close_path(),
                }
            }
            path
        }
    }
}

/// OpenType feature switches, e.g. `("liga", false)`
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFlags(Vec<(String, bool)>);

impl FeatureFlags {
    /// No features requested; the engine's own defaults apply
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Set a feature, replacing an earlier setting for the same tag
    pub fn with(mut self, tag: impl Into<String>, enabled: bool) -> Self {
        self.set(tag, enabled);
        self
    }

    pub fn set(&mut self, tag: impl Into<String>, enabled: bool) {
        let tag = tag.into();
        match self.0.iter_mut().find(|(t, _)| *t == tag) {
            Some(entry) => entry.1 = enabled,
            None => self.0.push((tag, enabled)),
        }
    }

    pub fn get(&self, tag: &str) -> Option<bool> {
        self.0.iter().find(|(t, _)| t == tag).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(t, v)| (t.as_str(), *v))
    }
}

impl Default for FeatureFlags {
    /// Kerning and standard ligatures on
    fn default() -> Self {
        Self::empty().with("kern", true).with("liga", true)
    }
}

/// How shaping should behave
#[derive(Debug, Clone, Default)]
pub struct ShapingParams {
    /// Absolute axis coordinates, already clamped
    pub variations: VariationSettings,
    pub features: FeatureFlags,
    /// Guessed from the text when `None`
    pub direction: Option<types::Direction>,
    pub language: Option<String>,
    /// ISO 15924 tag such as `"arab"`; guessed from the text when `None`
    pub script: Option<String>,
}
