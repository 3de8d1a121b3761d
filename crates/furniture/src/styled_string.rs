//! One string, one font, one style: shaped, spaced, fitted and drawn
//!
//! A `StyledString` is built for a single render and thrown away after. It
//! moves through these steps:
//!
//! 1. **Construct** - the font's axes are read and the requested values
//!    are resolved and merged over the axis defaults
//! 2. **Shape** - the shaper runs once per variation instance; the result
//!    is kept until the search changes an axis
//! 3. **Track** - the spacing policy shifts frames (kashida-aware when the
//!    font can elongate)
//! 4. **Scale** - design units become output units via `font_size / upem`
//! 5. **Project** - with a path attached, each glyph is moved to the
//!    point at its horizontal midpoint and rotated to follow the path
//! 6. **Fit / place** - the width search and rectangle alignment
//!
//! `fit` and `place` change tracking and axis values in place; drawing is a
//! pure read of whatever state they left behind.

use std::path::Path;
use std::sync::Arc;

use kurbo::{Affine, BezPath, Point, Rect, Shape, Vec2};

use furniture_core::{
    error::{LayoutError, Result},
    types::{GlyphPlacement, ShapingResult},
    AxisDiagnostic, AxisModel, FontRef, OutlineSource, Shaper, ShapingParams, VariationContext,
    VariationSettings,
};
use furniture_fontdb::Font;
use furniture_render::{CurveCutter, FaceOutliner, GlyphRecord, OutputSink};
use furniture_shape_hr::HarfrustShaper;

use crate::align::Alignment;
use crate::spacing::SpacingPolicy;
use crate::style::{FitOptions, Style};

/// How a width search ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    Fits { width: f64, iterations: usize },
    /// Out of iterations, or nothing left to shrink; the narrowest state
    /// reached is kept
    DoesNotFit { width: f64, iterations: usize },
}

impl FitOutcome {
    pub fn fits(&self) -> bool {
        matches!(self, FitOutcome::Fits { .. })
    }

    pub fn width(&self) -> f64 {
        match *self {
            FitOutcome::Fits { width, .. } | FitOutcome::DoesNotFit { width, .. } => width,
        }
    }

    pub fn iterations(&self) -> usize {
        match *self {
            FitOutcome::Fits { iterations, .. } | FitOutcome::DoesNotFit { iterations, .. } => {
                iterations
            },
        }
    }
}

/// A glyph ready to draw: its spaced, scaled placement and the transform
/// from design units to output space
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    pub placement: GlyphPlacement,
    pub transform: Affine,
}

pub struct StyledString {
    text: String,
    font: Arc<dyn FontRef>,
    shaper: Arc<dyn Shaper>,
    outlines: Arc<dyn OutlineSource>,
    style: Style,
    axes: AxisModel,
    variations: VariationSettings,
    tracking: f64,
    diagnostics: Vec<AxisDiagnostic>,
    shaped: Option<ShapingResult>,
    cutter: Option<CurveCutter>,
    offset: Vec2,
}

impl StyledString {
    /// Set `text` with harfrust shaping and skrifa outlines
    pub fn new(text: impl Into<String>, font: Arc<dyn FontRef>, style: Style) -> Result<Self> {
        let outlines = Arc::new(FaceOutliner::new(font.clone()));
        Self::with_backends(text, font, style, Arc::new(HarfrustShaper::new()), outlines)
    }

    /// Load the font at `path` and set `text` in it
    pub fn from_file(text: impl Into<String>, path: impl AsRef<Path>, style: Style) -> Result<Self> {
        let font: Arc<dyn FontRef> = Arc::new(Font::from_file(path)?);
        Self::new(text, font, style)
    }

    /// Set `text` with caller-supplied stages
    ///
    /// Pass a [`FaceOutliner`] built from a shared face to let many strings
    /// use one face.
    pub fn with_backends(
        text: impl Into<String>,
        font: Arc<dyn FontRef>,
        style: Style,
        shaper: Arc<dyn Shaper>,
        outlines: Arc<dyn OutlineSource>,
    ) -> Result<Self> {
        if !style.font_size.is_finite() || style.font_size <= 0.0 {
            return Err(LayoutError::InvalidFontSize(style.font_size).into());
        }

        let axes = AxisModel::new(font.axes());
        let normalized = axes.normalize(&style.variations, &style.normalize)?;

        let mut variations = axes.defaults();
        for (tag, value) in normalized.settings.iter() {
            variations.set(tag, value);
        }

        log::debug!(
            "StyledString: {} axes, instance {:?}, shaper {}, outlines {}",
            axes.axes().len(),
            variations.as_slice(),
            shaper.name(),
            outlines.name()
        );

        Ok(Self {
            text: text.into(),
            tracking: style.tracking,
            font,
            shaper,
            outlines,
            style,
            axes,
            variations,
            diagnostics: normalized.diagnostics,
            shaped: None,
            cutter: None,
            offset: Vec2::ZERO,
        })
    }

    /// Bend the string along `path`
    pub fn with_path(self, path: &BezPath) -> Self {
        self.with_cutter(CurveCutter::new(path))
    }

    pub fn with_cutter(mut self, cutter: CurveCutter) -> Self {
        self.cutter = Some(cutter);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn font(&self) -> &Arc<dyn FontRef> {
        &self.font
    }

    pub fn axes(&self) -> &AxisModel {
        &self.axes
    }

    /// Current tracking, in output units
    pub fn tracking(&self) -> f64 {
        self.tracking
    }

    /// Current axis coordinates
    pub fn variations(&self) -> &VariationSettings {
        &self.variations
    }

    /// What happened to the requested axis values at construction
    pub fn diagnostics(&self) -> &[AxisDiagnostic] {
        &self.diagnostics
    }

    /// Translation chosen by the last [`place`](Self::place)
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Output units per design unit
    pub fn scale(&self) -> f64 {
        self.style.font_size / f64::from(self.font.units_per_em().max(1))
    }

    /// Cap height in output units
    pub fn cap_height(&self) -> Option<f64> {
        self.font.cap_height().map(|h| f64::from(h) * self.scale())
    }

    /// Shape at the current instance, reusing the last result when the
    /// instance has not changed
    pub fn shape(&mut self) -> Result<&ShapingResult> {
        let shaped = match self.shaped.take() {
            Some(shaped) => shaped,
            None => {
                let params = ShapingParams {
                    variations: self.variations.clone(),
                    features: self.style.features.clone(),
                    direction: self.style.direction,
                    language: self.style.language.clone(),
                    script: self.style.script.clone(),
                };
                let shaped = self.shaper.shape(&self.text, self.font.clone(), &params)?;
                log::debug!(
                    "StyledString: shaped {:?} into {} glyphs",
                    self.text,
                    shaped.glyphs.len()
                );
                shaped
            },
        };
        let shaped: &ShapingResult = self.shaped.insert(shaped);
        Ok(shaped)
    }

    /// Spaced and scaled placements, before any path or alignment
    pub fn glyphs(&mut self) -> Result<Vec<GlyphPlacement>> {
        let scale = self.scale();
        let shaped = self.shape()?.glyphs.clone();

        let policy = SpacingPolicy::new(
            self.style.spacing,
            self.tracking / scale,
            self.style.space / scale,
        );
        let spaced = policy.apply(&shaped, &self.text, self.font.as_ref());

        Ok(spaced.iter().map(|glyph| glyph.scaled(scale)).collect())
    }

    /// Rightmost edge of any glyph with an advance, in output units
    ///
    /// Zero-advance marks follow tracking off their base in either direction
    /// and never extend the string.
    pub fn width(&mut self) -> Result<f64> {
        Ok(self
            .glyphs()?
            .iter()
            .filter(|glyph| glyph.frame.width() > 0.0)
            .map(|glyph| glyph.frame.x1)
            .fold(0.0, f64::max))
    }

    /// Shrink until the string is at most `target` wide
    ///
    /// Each iteration lowers tracking by one step while it is above its
    /// floor; after that it lowers the first axis in
    /// [`FitOptions::axis_floors`] still above its floor. Never widens.
    pub fn fit(&mut self, target: f64) -> Result<FitOutcome> {
        if !target.is_finite() {
            return Err(LayoutError::InvalidTarget(target).into());
        }

        let max_iterations = self.style.fit.max_iterations;
        let mut width = self.width()?;
        let mut iterations = 0;

        while width > target {
            if iterations >= max_iterations {
                log::warn!(
                    "{:?} does not fit in {target}: still {width} wide after {iterations} iterations",
                    self.text
                );
                return Ok(FitOutcome::DoesNotFit { width, iterations });
            }
            if !self.step_down() {
                log::warn!(
                    "{:?} does not fit in {target}: {width} wide with every floor reached",
                    self.text
                );
                return Ok(FitOutcome::DoesNotFit { width, iterations });
            }
            iterations += 1;
            width = self.width()?;
            log::trace!(
                "fit step {iterations}: tracking {}, {:?} -> {width}",
                self.tracking,
                self.variations.as_slice()
            );
        }

        log::debug!("StyledString: fits in {target} after {iterations} iterations ({width})");
        Ok(FitOutcome::Fits { width, iterations })
    }

    /// One decrement of tracking or an axis; false when everything sits at
    /// its floor
    fn step_down(&mut self) -> bool {
        let fit = &self.style.fit;

        if self.tracking > fit.tracking_floor {
            let step = if fit.tracking_step.is_finite() && fit.tracking_step > 0.0 {
                fit.tracking_step
            } else {
                FitOptions::DEFAULT_TRACKING_STEP
            };
            self.tracking = (self.tracking - step).max(fit.tracking_floor);
            return true;
        }

        for (tag, floor) in &fit.axis_floors {
            let Some(axis) = self.axes.axis(tag) else {
                continue;
            };
            let floor = (*floor).max(axis.min_value);
            let current = self.variations.get(tag).unwrap_or(axis.default_value);
            if current > floor {
                let next = axis.clamp((current - fit.axis_step(tag)).max(floor));
                self.variations.set(tag.clone(), next);
                // The instance changed, so the old shaping no longer applies.
                self.shaped = None;
                return true;
            }
        }

        false
    }

    /// Fit to `rect`'s width and anchor the result inside it
    pub fn place(&mut self, rect: Rect, alignment: Alignment) -> Result<FitOutcome> {
        let rect = rect.abs();
        let outcome = self.fit(rect.width())?;

        self.offset = Vec2::ZERO;
        let placed = self.layout()?;
        let ink = self.ink_bounds(&placed)?;
        let advance = advance_bounds(&placed, self.scale());
        let cap_height = self
            .cap_height()
            .or_else(|| ink.map(|r| r.y1))
            .unwrap_or(0.0);

        self.offset = alignment.offset(rect, ink, advance, cap_height);
        log::debug!("StyledString: placed {alignment} at {:?}", self.offset);
        Ok(outcome)
    }

    /// Every glyph with its final transform
    ///
    /// With a path attached, glyphs whose midpoint falls past the end of
    /// the path are left out.
    pub fn layout(&mut self) -> Result<Vec<PlacedGlyph>> {
        let scale = self.scale();
        let glyphs = self.glyphs()?;
        let offset = Affine::translate(self.offset);

        let Some(cutter) = &self.cutter else {
            return Ok(glyphs
                .into_iter()
                .map(|placement| PlacedGlyph {
                    transform: offset * flat_transform(&placement, scale),
                    placement,
                })
                .collect());
        };

        let total = glyphs.len();
        let mut placed = Vec::with_capacity(total);
        for placement in glyphs {
            let mid = (placement.frame.x0 + placement.frame.x1) / 2.0;
            let Some((point, tangent)) = cutter.point_and_tangent_at_length(mid) else {
                log::warn!(
                    "Path of length {} exhausted; dropping {} of {total} glyphs",
                    cutter.length(),
                    total - placed.len()
                );
                break;
            };
            let transform = offset
                * Affine::translate(point.to_vec2())
                * Affine::rotate((tangent - 90.0).to_radians())
                * Affine::translate((-mid, 0.0))
                * flat_transform(&placement, scale);
            placed.push(PlacedGlyph {
                placement,
                transform,
            });
        }
        Ok(placed)
    }

    /// Emit every glyph into `sink`
    pub fn draw_to(&mut self, sink: &mut OutputSink) -> Result<()> {
        let placed = self.layout()?;
        let context = VariationContext::new(self.variations.clone());

        for glyph in placed {
            let id = glyph.placement.id;
            let outline = self.outlines.outline(id, &context, self.style.outline_mode)?;
            sink.emit(GlyphRecord {
                glyph_id: id,
                name: self.font.glyph_name(id),
                outline,
                advance: glyph.placement.advance_x,
                transform: glyph.transform,
            });
        }
        Ok(())
    }

    /// The finished geometry as one cubic-only path in output space
    pub fn as_outline(&mut self) -> Result<BezPath> {
        let mut sink = OutputSink::path();
        self.draw_to(&mut sink)?;
        Ok(sink.into_path())
    }

    /// Tight box around the drawn glyphs, `None` when nothing has ink
    fn ink_bounds(&self, placed: &[PlacedGlyph]) -> Result<Option<Rect>> {
        let context = VariationContext::new(self.variations.clone());
        let mut bounds: Option<Rect> = None;

        for glyph in placed {
            let outline = self
                .outlines
                .outline(glyph.placement.id, &context, self.style.outline_mode)?;
            if outline.is_empty() {
                continue;
            }
            let bbox = outline.to_bez_path(glyph.transform).bounding_box();
            bounds = Some(bounds.map_or(bbox, |b| b.union(bbox)));
        }
        Ok(bounds)
    }
}

/// Design units to output space for an unbent glyph
fn flat_transform(placement: &GlyphPlacement, scale: f64) -> Affine {
    Affine::translate((
        placement.frame.x0 + placement.offset_x,
        placement.offset_y,
    )) * Affine::scale(scale)
}

/// Box through each glyph's pen start and pen end on the baseline
fn advance_bounds(placed: &[PlacedGlyph], scale: f64) -> Rect {
    let mut points = placed.iter().flat_map(|glyph| {
        let advance = if scale > 0.0 {
            glyph.placement.advance_x / scale
        } else {
            0.0
        };
        [
            glyph.transform * Point::ZERO,
            glyph.transform * Point::new(advance, 0.0),
        ]
    });

    let Some(first) = points.next() else {
        return Rect::ZERO;
    };
    points.fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p))
}
