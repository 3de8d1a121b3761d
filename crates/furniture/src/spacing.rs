//! Moving glyphs apart: uniform tracking and kashida-aware spacing
//!
//! Both passes take placements in design units and return shifted copies;
//! the input is never edited. Each glyph's frame moves by the running sum
//! of the gaps inserted before it, so the first glyph never moves.

use furniture_core::{types::GlyphPlacement, FontRef};
use furniture_unicode::{is_lam_or_meem, is_vowel_mark, joining_form, resolve_name};

use crate::style::SpacingMode;

/// Gap multiplier before a joining Lam or Meem
pub const LAM_MEEM_FACTOR: f64 = 2.7;

/// Gap multiplier before any other initial or medial form
pub const JOINING_FACTOR: f64 = 1.6;

/// Add `tracking` after every glyph, and `space` more after each space
///
/// A glyph counts as a space when the character at its cluster is `' '`.
pub fn apply_tracking(
    glyphs: &[GlyphPlacement],
    text: &str,
    tracking: f64,
    space: f64,
) -> Vec<GlyphPlacement> {
    let mut x_off = 0.0;
    glyphs
        .iter()
        .map(|glyph| {
            let moved = glyph.shifted(x_off);
            x_off += tracking;
            if char_at(text, glyph.cluster) == Some(' ') {
                x_off += space;
            }
            moved
        })
        .collect()
}

/// Concentrate spacing at Arabic joining points
///
/// `names` holds one resolved name per glyph (see [`glyph_names`]). Before
/// every glyph that is not a vowel mark, except the first, a gap of
/// `tracking` times a factor goes in: 2.7 for an initial or medial Lam or
/// Meem, 1.6 for other initial or medial forms, 1 otherwise. Marks get no
/// gap of their own so they stay on their base letter. As with
/// [`apply_tracking`], a glyph whose cluster is `' '` adds `space` after
/// itself.
pub fn apply_kashida_spacing(
    glyphs: &[GlyphPlacement],
    names: &[String],
    text: &str,
    tracking: f64,
    space: f64,
) -> Vec<GlyphPlacement> {
    let mut x_off = 0.0;
    let mut seen_base = false;
    let mut out = Vec::with_capacity(glyphs.len());

    for (i, glyph) in glyphs.iter().enumerate() {
        let name = names.get(i).map(String::as_str).unwrap_or("");

        if !is_vowel_mark(name) {
            if seen_base {
                x_off += tracking * joining_factor(name);
            }
            seen_base = true;
        }

        out.push(glyph.shifted(x_off));

        if char_at(text, glyph.cluster) == Some(' ') {
            x_off += space;
        }
    }

    out
}

fn joining_factor(name: &str) -> f64 {
    if !joining_form(name).joins_forward() {
        1.0
    } else if is_lam_or_meem(name) {
        LAM_MEEM_FACTOR
    } else {
        JOINING_FACTOR
    }
}

/// Resolved upper-case name for every glyph
///
/// Uses the font's glyph name first, then the source character at the
/// glyph's cluster.
pub fn glyph_names(glyphs: &[GlyphPlacement], text: &str, font: &dyn FontRef) -> Vec<String> {
    glyphs
        .iter()
        .map(|glyph| {
            let glyph_name = font.glyph_name(glyph.id);
            resolve_name(glyph_name.as_deref(), char_at(text, glyph.cluster))
        })
        .collect()
}

fn char_at(text: &str, cluster: u32) -> Option<char> {
    text.get(cluster as usize..)?.chars().next()
}

/// A spacing rule with its amounts, in design units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingPolicy {
    pub mode: SpacingMode,
    pub tracking: f64,
    pub space: f64,
}

impl SpacingPolicy {
    pub fn new(mode: SpacingMode, tracking: f64, space: f64) -> Self {
        Self {
            mode,
            tracking,
            space,
        }
    }

    /// Pin `Auto` down for a particular font
    pub fn resolve(mode: SpacingMode, font: &dyn FontRef) -> SpacingMode {
        match mode {
            SpacingMode::Auto if font.has_kashida() => SpacingMode::Kashida,
            SpacingMode::Auto => SpacingMode::Uniform,
            other => other,
        }
    }

    pub fn apply(
        &self,
        glyphs: &[GlyphPlacement],
        text: &str,
        font: &dyn FontRef,
    ) -> Vec<GlyphPlacement> {
        match Self::resolve(self.mode, font) {
            SpacingMode::Kashida => {
                let names = glyph_names(glyphs, text, font);
                apply_kashida_spacing(glyphs, &names, text, self.tracking, self.space)
            },
            _ => apply_tracking(glyphs, text, self.tracking, self.space),
        }
    }
}
