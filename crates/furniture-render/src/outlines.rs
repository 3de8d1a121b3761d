//! Glyph outlines as cubic-only paths
//!
//! skrifa hands us quadratic curves for TrueType glyphs and cubics for CFF.
//! Everything downstream wants one curve type, so [`CubicPen`] raises each
//! quadratic to its exact cubic equivalent while recording.
//!
//! Two extraction strategies exist:
//!
//! - [`OutlineMode::Rasterizer`] asks the hinting engine for the outline at
//!   a ppem equal to units per em, so coordinates stay in design units but
//!   the curves are the ones a rasterizer would fill.
//! - [`OutlineMode::Native`] draws the glyph table's own curves, unhinted
//!   and unscaled.

use std::sync::Arc;

use kurbo::Point;
use parking_lot::Mutex;
use skrifa::{
    instance::Size,
    outline::{DrawSettings, HintingInstance, HintingOptions, OutlinePen},
    GlyphId as SkrifaGlyphId, MetadataProvider,
};

use furniture_core::{
    cache_config::CachePolicy,
    error::{OutlineError, Result},
    traits::{FontRef, OutlineSource},
    types::{GlyphId, GlyphOutline, OutlineMode, OutlineSegment},
    VariableFace, VariationContext, VariationSettings,
};

use crate::glyph_cache::{OutlineCache, OutlineCacheKey, OutlineCacheStats};

/// Raise a quadratic `start, ctrl, end` to the cubic tracing the same curve
///
/// Returns the two cubic control points followed by the end point.
pub fn raise_quadratic(start: Point, ctrl: Point, end: Point) -> (Point, Point, Point) {
    let c1 = start + (ctrl - start) * (2.0 / 3.0);
    let c2 = end + (ctrl - end) * (2.0 / 3.0);
    (c1, c2, end)
}

/// Records skrifa drawing calls as cubic-only segments
///
/// Every subpath is terminated with an explicit `Close`, including one the
/// font left open.
#[derive(Debug, Default)]
pub struct CubicPen {
    segments: Vec<OutlineSegment>,
    current: Point,
    open: bool,
}

impl CubicPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish recording, closing a dangling subpath if needed
    pub fn finish(mut self) -> GlyphOutline {
        self.close_if_open();
        GlyphOutline::new(self.segments)
    }

    fn close_if_open(&mut self) {
        if self.open {
            self.segments.push(OutlineSegment::Close);
            self.open = false;
        }
    }
}

impl OutlinePen for CubicPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.close_if_open();
        let p = Point::new(x as f64, y as f64);
        self.segments.push(OutlineSegment::MoveTo(p));
        self.current = p;
        self.open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = Point::new(x as f64, y as f64);
        self.segments.push(OutlineSegment::LineTo(p));
        self.current = p;
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let ctrl = Point::new(cx0 as f64, cy0 as f64);
        let end = Point::new(x as f64, y as f64);
        let (c1, c2, end) = raise_quadratic(self.current, ctrl, end);
        self.segments.push(OutlineSegment::CubicTo(c1, c2, end));
        self.current = end;
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let end = Point::new(x as f64, y as f64);
        self.segments.push(OutlineSegment::CubicTo(
            Point::new(cx0 as f64, cy0 as f64),
            Point::new(cx1 as f64, cy1 as f64),
            end,
        ));
        self.current = end;
    }

    fn close(&mut self) {
        if self.open {
            self.segments.push(OutlineSegment::Close);
            self.open = false;
        }
    }
}

/// A font face whose variation coordinates are set in place
///
/// This is the mutable resource behind outline extraction: coordinates are
/// pushed in through [`VariationContext::apply_to`] and stay until the next
/// push. Share it as a [`SharedFace`] and hold the lock across
/// apply + extract.
///
/// Extracted outlines are remembered per instance while the face's
/// [`CachePolicy`] allows it. When the policy turns caching off, the stored
/// outlines are dropped at the next lookup.
pub struct OutlineFace {
    font: Arc<dyn FontRef>,
    variations: VariationSettings,
    cache: OutlineCache,
    policy: CachePolicy,
}

impl OutlineFace {
    pub fn new(font: Arc<dyn FontRef>) -> Self {
        Self {
            font,
            variations: VariationSettings::new(),
            cache: OutlineCache::default(),
            policy: CachePolicy::default(),
        }
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = OutlineCache::new(capacity);
        self
    }

    /// Wrap the face for sharing between strings
    pub fn into_shared(self) -> SharedFace {
        Arc::new(Mutex::new(self))
    }

    pub fn font(&self) -> &Arc<dyn FontRef> {
        &self.font
    }

    pub fn cache_stats(&self) -> OutlineCacheStats {
        self.cache.stats()
    }

    /// Outline of `glyph_id` at the face's current coordinates
    pub fn outline(&mut self, glyph_id: GlyphId, mode: OutlineMode) -> Result<GlyphOutline> {
        if !self.policy.is_enabled() {
            if self.cache.stats().size > 0 {
                log::debug!("Outline caching off; dropping stored outlines");
                self.cache.clear();
            }
            return self.extract(glyph_id, mode);
        }

        let key = OutlineCacheKey::new(glyph_id, mode, &self.variations);
        if let Some(outline) = self.cache.get(&key) {
            log::trace!("Outline cache hit for glyph {glyph_id}");
            return Ok(outline);
        }

        let outline = self.extract(glyph_id, mode)?;
        self.cache.insert(key, outline.clone());
        Ok(outline)
    }

    fn extract(&self, glyph_id: GlyphId, mode: OutlineMode) -> Result<GlyphOutline> {
        let data = self.font.data();
        if data.is_empty() {
            // Metrics-only fonts have nothing to draw.
            return Ok(GlyphOutline::default());
        }

        let font = skrifa::FontRef::from_index(data, self.font.face_index())
            .map_err(|_| OutlineError::InvalidFont)?;
        let outlines = font.outline_glyphs();
        let glyph = outlines
            .get(SkrifaGlyphId::new(glyph_id))
            .ok_or(OutlineError::GlyphNotFound(glyph_id))?;
        let location = font.axes().location(self.variations.iter());

        let mut pen = CubicPen::new();
        let drawn = match mode {
            OutlineMode::Native => {
                glyph.draw(DrawSettings::unhinted(Size::unscaled(), &location), &mut pen)
            },
            OutlineMode::Rasterizer => {
                let upem = f32::from(self.font.units_per_em());
                let instance = HintingInstance::new(
                    &outlines,
                    Size::new(upem),
                    &location,
                    HintingOptions::default(),
                )
                .map_err(|e| OutlineError::HintingFailed(e.to_string()))?;
                glyph.draw(DrawSettings::hinted(&instance, false), &mut pen)
            },
        };
        drawn.map_err(|e| OutlineError::DrawFailed {
            glyph_id,
            reason: e.to_string(),
        })?;

        Ok(pen.finish())
    }
}

impl VariableFace for OutlineFace {
    fn set_variations(&mut self, settings: &VariationSettings) {
        self.variations = settings.clone();
    }

    fn variations(&self) -> &VariationSettings {
        &self.variations
    }
}

/// A face shared read-mostly between strings; one writer at a time
pub type SharedFace = Arc<Mutex<OutlineFace>>;

/// [`OutlineSource`] over a shared face
///
/// Each call locks the face, applies the caller's variation context and
/// extracts while still holding the lock, so concurrent callers with
/// different instances never see each other's coordinates.
#[derive(Clone)]
pub struct FaceOutliner {
    face: SharedFace,
}

impl FaceOutliner {
    pub fn new(font: Arc<dyn FontRef>) -> Self {
        Self::from_shared(OutlineFace::new(font).into_shared())
    }

    pub fn from_shared(face: SharedFace) -> Self {
        Self { face }
    }

    pub fn face(&self) -> &SharedFace {
        &self.face
    }
}

impl OutlineSource for FaceOutliner {
    fn name(&self) -> &'static str {
        "skrifa"
    }

    fn outline(
        &self,
        glyph_id: GlyphId,
        variations: &VariationContext,
        mode: OutlineMode,
    ) -> Result<GlyphOutline> {
        let mut face = self.face.lock();
        variations.apply_to(&mut *face);
        face.outline(glyph_id, mode)
    }
}
