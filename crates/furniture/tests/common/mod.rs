// this_file: crates/furniture/tests/common/mod.rs

//! Fonts and stages that need no font files

#![allow(dead_code)]

use std::sync::Arc;

use furniture::core::{
    types::{Direction, GlyphOutline, GlyphPlacement, OutlineMode, OutlineSegment, ShapingResult},
    FontRef, OutlineSource, Result, Shaper, ShapingParams, VariationAxis, VariationContext,
};
use kurbo::{Point, Rect};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Latin-only metrics font with a `wght` axis 100..900, default 400
pub struct VariableFont {
    pub cap_height: Option<f32>,
}

impl VariableFont {
    pub fn new() -> Arc<dyn FontRef> {
        Arc::new(Self {
            cap_height: Some(700.0),
        })
    }
}

impl FontRef for VariableFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        ch.is_ascii().then_some(ch as u32)
    }

    fn advance_width(&self, _glyph_id: u32) -> f32 {
        500.0
    }

    fn axes(&self) -> Vec<VariationAxis> {
        vec![VariationAxis::new("wght", 100.0, 400.0, 900.0)]
    }

    fn cap_height(&self) -> Option<f32> {
        self.cap_height
    }
}

/// Shaper whose advances grow with weight: 500 units at wght 400
pub struct WeightShaper;

impl Shaper for WeightShaper {
    fn name(&self) -> &'static str {
        "weight"
    }

    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<ShapingResult> {
        let wght = f64::from(params.variations.get("wght").unwrap_or(400.0));
        let advance = 500.0 * wght / 400.0;
        let upem = font.units_per_em();
        let mut pen = 0.0;

        let glyphs = text
            .char_indices()
            .map(|(cluster, ch)| {
                let glyph = GlyphPlacement {
                    id: font.glyph_id(ch).unwrap_or(0),
                    cluster: cluster as u32,
                    advance_x: advance,
                    advance_y: 0.0,
                    offset_x: 0.0,
                    offset_y: 0.0,
                    frame: Rect::new(pen, 0.0, pen + advance, f64::from(upem)),
                };
                pen += advance;
                glyph
            })
            .collect();

        Ok(ShapingResult {
            glyphs,
            advance_width: pen,
            units_per_em: upem,
            direction: Direction::LeftToRight,
        })
    }
}

/// Every glyph is a 400 x 700 box starting 50 units in
pub struct BoxOutlines;

impl OutlineSource for BoxOutlines {
    fn name(&self) -> &'static str {
        "boxes"
    }

    fn outline(&self, _: u32, _: &VariationContext, _: OutlineMode) -> Result<GlyphOutline> {
        Ok(GlyphOutline::new(vec![
            OutlineSegment::MoveTo(Point::new(50.0, 0.0)),
            OutlineSegment::LineTo(Point::new(450.0, 0.0)),
            OutlineSegment::LineTo(Point::new(450.0, 700.0)),
            OutlineSegment::LineTo(Point::new(50.0, 700.0)),
            OutlineSegment::Close,
        ]))
    }
}

/// A hairline on the baseline: ink with zero height
pub struct FlatOutlines;

impl OutlineSource for FlatOutlines {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn outline(&self, _: u32, _: &VariationContext, _: OutlineMode) -> Result<GlyphOutline> {
        Ok(GlyphOutline::new(vec![
            OutlineSegment::MoveTo(Point::new(0.0, 0.0)),
            OutlineSegment::LineTo(Point::new(500.0, 0.0)),
            OutlineSegment::Close,
        ]))
    }
}

/// Nothing has ink
pub struct NoOutlines;

impl OutlineSource for NoOutlines {
    fn name(&self) -> &'static str {
        "none"
    }

    fn outline(&self, _: u32, _: &VariationContext, _: OutlineMode) -> Result<GlyphOutline> {
        Ok(GlyphOutline::default())
    }
}

/// Arabic presentation-form font: every code point is its own glyph, named
/// `uniXXXX`, and the tatweel is present
pub struct ArabicFont;

impl FontRef for ArabicFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        Some(ch as u32)
    }

    fn advance_width(&self, glyph_id: u32) -> f32 {
        match char::from_u32(glyph_id) {
            // Marks take no room
            Some('\u{064B}'..='\u{0652}') => 0.0,
            _ => 500.0,
        }
    }

    fn glyph_name(&self, glyph_id: u32) -> Option<String> {
        Some(format!("uni{glyph_id:04X}"))
    }
}

/// Arabic font whose contextual glyphs carry `uniXXXX.medi`-style names:
/// beh is drawn initial, lam and meem medial
pub struct SuffixedArabicFont;

impl FontRef for SuffixedArabicFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        Some(ch as u32)
    }

    fn advance_width(&self, _glyph_id: u32) -> f32 {
        500.0
    }

    fn glyph_name(&self, glyph_id: u32) -> Option<String> {
        let suffix = match glyph_id {
            0x0628 => ".init",
            0x0644 | 0x0645 => ".medi",
            _ => "",
        };
        Some(format!("uni{glyph_id:04X}{suffix}"))
    }
}
