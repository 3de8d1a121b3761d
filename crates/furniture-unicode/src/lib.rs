// this_file: crates/furniture-unicode/src/lib.rs

//! Glyph-name decoding and Arabic joining-form classification.
//!
//! Shaped Arabic text arrives as contextual glyphs (`uniFEE0`, `lam.medi`,
//! ...), not as characters. Spacing rules need to know which glyphs are
//! initial or medial joining forms and which are vowel marks, so a glyph is
//! described by the most informative name available:
//!
//! 1. the Unicode character name, if the glyph name encodes a code point
//!    (`uniXXXX` / `uXXXXX`), e.g. `ARABIC LETTER LAM MEDIAL FORM`, with
//!    any variant suffix kept (`uni0644.medi` → `ARABIC LETTER LAM.MEDI`);
//! 2. otherwise the raw glyph name, upper-cased (`LAM.MEDI`);
//! 3. otherwise the Unicode name of the source character.
//!
//! Matching is by substring and therefore approximate for private-use or
//! unnamed glyphs.

/// Position of a glyph inside a joined Arabic word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoiningForm {
    Isolated,
    Initial,
    Medial,
    Final,
    /// No joining information in the name
    None,
}

impl JoiningForm {
    /// Initial and medial forms connect to the following letter
    pub fn joins_forward(self) -> bool {
        matches!(self, JoiningForm::Initial | JoiningForm::Medial)
    }
}

/// Names of the marks that ride on a letter rather than occupying a slot
const VOWEL_MARKS: [&str; 5] = ["FATHA", "KASRA", "DAMMA", "TATWEEL", "SUKUN"];

/// Decode a code point from an AGL-style glyph name.
///
/// Accepts `uniXXXX` (exactly four hex digits) and `uXXXX`..`uXXXXXX`.
/// Anything after the first `.` is a variant suffix and ignored.
pub fn decode_glyph_name(name: &str) -> Option<char> {
    let base = name.split('.').next().unwrap_or(name);

    let hex = if let Some(rest) = base.strip_prefix("uni") {
        (rest.len() == 4).then_some(rest)?
    } else if let Some(rest) = base.strip_prefix('u') {
        (4..=6).contains(&rest.len()).then_some(rest)?
    } else {
        return None;
    };

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Unicode character name, e.g. `ARABIC LETTER MEEM`
pub fn character_name(ch: char) -> Option<String> {
    unicode_names2::name(ch).map(|name| name.to_string())
}

/// Best available upper-case description of a shaped glyph
pub fn resolve_name(glyph_name: Option<&str>, source_char: Option<char>) -> String {
    if let Some(name) = glyph_name.filter(|n| !n.is_empty()) {
        if let Some(described) = decode_glyph_name(name).and_then(character_name) {
            // Keep the variant suffix: `uni0644.medi` is still a medial form.
            return match name.split_once('.') {
                Some((_, suffix)) => format!("{described}.{}", suffix.to_ascii_uppercase()),
                None => described,
            };
        }
        return name.to_ascii_uppercase();
    }

    source_char
        .and_then(character_name)
        .unwrap_or_default()
}

/// Joining form encoded in a resolved name
pub fn joining_form(name: &str) -> JoiningForm {
    let upper = name.to_ascii_uppercase();
    let has_suffix = |suffix: &str| upper.split('.').skip(1).any(|part| part == suffix);
    if upper.contains("MEDIAL") || has_suffix("MEDI") {
        JoiningForm::Medial
    } else if upper.contains("INITIAL") || has_suffix("INIT") {
        JoiningForm::Initial
    } else if upper.contains("FINAL") || has_suffix("FINA") {
        JoiningForm::Final
    } else if upper.contains("ISOLATED") || has_suffix("ISOL") {
        JoiningForm::Isolated
    } else {
        JoiningForm::None
    }
}

/// Whether a resolved name denotes a vowel mark or the tatweel itself
pub fn is_vowel_mark(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    VOWEL_MARKS.iter().any(|mark| upper.contains(mark))
}

/// Meem and Lam take the longest elongation
pub fn is_lam_or_meem(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    upper.contains("MEEM") || upper.contains("LAM")
}


#[cfg(test)]
mod proptests;
