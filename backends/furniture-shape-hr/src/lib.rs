//! Pure Rust text shaping backend using harfrust
//!
//! Harfrust is a pure Rust port of HarfBuzz. Script, direction and language
//! are guessed from the text unless the caller pins them, and variation
//! coordinates are applied to the shaping instance first so contextual
//! substitutions and kerning follow the variable instance.
//!
//! Placements come back in font design units. Every glyph gets a provisional
//! frame one em tall starting at its pen position; the layout layer rescales
//! it later.

use std::str::FromStr;
use std::sync::Arc;

use harfrust::{
    Direction as HrDirection, Feature, FontRef as HrFontRef, GlyphBuffer, Language, Script,
    ShaperData, ShaperInstance, Tag, UnicodeBuffer, Variation,
};
use kurbo::Rect;

use furniture_core::{
    error::{Result, ShapingError},
    traits::{FontRef, Shaper},
    types::{Direction, GlyphPlacement, ShapingResult},
    ShapingParams,
};

/// Text shaping powered by harfrust
#[derive(Debug, Default, Clone, Copy)]
pub struct HarfrustShaper;

impl HarfrustShaper {
    pub fn new() -> Self {
        Self
    }

    fn to_hr_direction(dir: Direction) -> HrDirection {
        match dir {
            Direction::LeftToRight => HrDirection::LeftToRight,
            Direction::RightToLeft => HrDirection::RightToLeft,
            Direction::TopToBottom => HrDirection::TopToBottom,
            Direction::BottomToTop => HrDirection::BottomToTop,
        }
    }

    fn from_hr_direction(dir: HrDirection) -> Direction {
        match dir {
            HrDirection::RightToLeft => Direction::RightToLeft,
            HrDirection::TopToBottom => Direction::TopToBottom,
            HrDirection::BottomToTop => Direction::BottomToTop,
            _ => Direction::LeftToRight,
        }
    }

    /// Parse a 4-character tag string into a harfrust Tag
    fn parse_tag(tag_str: &str) -> Result<Tag> {
        let bytes = tag_str.as_bytes();
        if bytes.len() == 4 {
            Ok(Tag::new(&[bytes[0], bytes[1], bytes[2], bytes[3]]))
        } else {
            Err(ShapingError::InvalidTag(tag_str.to_string()).into())
        }
    }

    /// Nominal one-glyph-per-char shaping for fonts that carry no bytes
    fn fallback_shape(text: &str, font: &dyn FontRef, params: &ShapingParams) -> ShapingResult {
        let upem = font.units_per_em();
        let mut glyphs = Vec::new();
        let mut pen = 0.0;

        for (cluster, ch) in text.char_indices() {
            let id = font.glyph_id(ch).unwrap_or(0);
            let advance = font.advance_width(id) as f64;
            glyphs.push(GlyphPlacement {
                id,
                cluster: cluster as u32,
                advance_x: advance,
                advance_y: 0.0,
                offset_x: 0.0,
                offset_y: 0.0,
                frame: Rect::new(pen, 0.0, pen + advance, upem as f64),
            });
            pen += advance;
        }

        ShapingResult {
            glyphs,
            advance_width: pen,
            units_per_em: upem,
            direction: params.direction.unwrap_or(Direction::LeftToRight),
        }
    }

    /// Extract design-unit placements from harfrust's GlyphBuffer
    fn extract_glyphs(buffer: &GlyphBuffer, upem: u16) -> (Vec<GlyphPlacement>, f64) {
        let mut glyphs = Vec::with_capacity(buffer.len());
        let mut pen = 0.0;

        for (info, pos) in buffer.glyph_infos().iter().zip(buffer.glyph_positions()) {
            let advance = pos.x_advance as f64;
            glyphs.push(GlyphPlacement {
                id: info.glyph_id,
                cluster: info.cluster,
                advance_x: advance,
                advance_y: pos.y_advance as f64,
                offset_x: pos.x_offset as f64,
                offset_y: pos.y_offset as f64,
                frame: Rect::new(pen, 0.0, pen + advance, upem as f64),
            });
            pen += advance;
        }

        (glyphs, pen)
    }
}

impl Shaper for HarfrustShaper {
    fn name(&self) -> &'static str {
        "Harfrust"
    }

    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<ShapingResult> {
        let upem = font.units_per_em();

        if text.is_empty() {
            return Ok(ShapingResult {
                glyphs: Vec::new(),
                advance_width: 0.0,
                units_per_em: upem,
                direction: params.direction.unwrap_or(Direction::LeftToRight),
            });
        }

        let font_data = font.data();
        if font_data.is_empty() {
            log::debug!("Harfrust: no font bytes, using nominal glyph lookup");
            return Ok(Self::fallback_shape(text, font.as_ref(), params));
        }

        let hr_font = HrFontRef::from_index(font_data, font.face_index())
            .map_err(|_| ShapingError::InvalidFont)?;
        let shaper_data = ShaperData::new(&hr_font);

        let variations = params
            .variations
            .iter()
            .map(|(tag, value)| Ok(Variation { tag: Self::parse_tag(tag)?, value }))
            .collect::<Result<Vec<_>>>()?;
        // Static fonts simply shape their default instance.
        let instance = (!variations.is_empty())
            .then(|| ShaperInstance::from_variations(&hr_font, variations));

        let shaper = shaper_data
            .shaper(&hr_font)
            .instance(instance.as_ref())
            .build();

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);

        if let Some(ref lang) = params.language {
            match Language::from_str(lang) {
                Ok(language) => buffer.set_language(language),
                Err(_) => log::warn!("Harfrust: ignoring unparsable language {lang:?}"),
            }
        }

        if let Some(ref script_str) = params.script {
            let tag = Self::parse_tag(script_str)?;
            match Script::from_iso15924_tag(tag) {
                Some(script) => buffer.set_script(script),
                None => log::warn!("Harfrust: unknown script tag {script_str:?}"),
            }
        }

        if let Some(direction) = params.direction {
            buffer.set_direction(Self::to_hr_direction(direction));
        }

        // Anything not pinned above is inferred from the text itself.
        buffer.guess_segment_properties();
        let direction = Self::from_hr_direction(buffer.direction());

        let features = params
            .features
            .iter()
            .map(|(name, enabled)| {
                Ok(Feature {
                    tag: Self::parse_tag(name)?,
                    value: u32::from(enabled),
                    start: 0,
                    end: u32::MAX,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let output = shaper.shape(buffer, &features);
        let (glyphs, advance_width) = Self::extract_glyphs(&output, upem);

        log::debug!(
            "Harfrust: shaped {} chars into {} glyphs ({:?})",
            text.chars().count(),
            glyphs.len(),
            direction
        );

        Ok(ShapingResult {
            glyphs,
            advance_width,
            units_per_em: upem,
            direction,
        })
    }
}
